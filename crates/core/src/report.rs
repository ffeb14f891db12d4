//! Debate report content: templates, fallback, and LLM reply parsing.
//!
//! Every completed room gets exactly one report. Free-text rooms ask the LLM
//! for it and fall back to [`fallback_report`] on any failure; playback and
//! MCQ rooms use fixed templates filled with session counts.

use serde::{Deserialize, Serialize};

use crate::debate::Stance;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Declared outcome of a debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    User,
    Ai,
    Tie,
}

impl Winner {
    /// Lenient parse used for LLM output; anything unrecognised is a tie.
    pub fn from_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Self::User,
            "ai" | "assistant" => Self::Ai,
            _ => Self::Tie,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
            Self::Tie => "tie",
        }
    }
}

/// The four 1-10 scores of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportScores {
    pub argument_strength: i32,
    pub evidence_quality: i32,
    pub rebuttal_effectiveness: i32,
    pub clarity: i32,
}

impl ReportScores {
    pub fn all(&self) -> [i32; 4] {
        [
            self.argument_strength,
            self.evidence_quality,
            self.rebuttal_effectiveness,
            self.clarity,
        ]
    }
}

/// A report before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportContent {
    pub overall_analysis: String,
    pub strengths: String,
    pub improvements: String,
    pub insights: String,
    pub scores: ReportScores,
    pub winner: Winner,
    pub choices_made: Option<i32>,
    pub user_stance: Option<Stance>,
    pub rounds_watched: Option<i32>,
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Report used when the LLM fails or returns something unparseable.
pub fn fallback_report() -> ReportContent {
    ReportContent {
        overall_analysis: "You engaged with the topic and presented your position \
                           consistently throughout the debate."
            .to_string(),
        strengths: "Clear statement of your position and willingness to respond \
                    to counterarguments."
            .to_string(),
        improvements: "Support your claims with concrete evidence and address the \
                       strongest opposing point directly."
            .to_string(),
        insights: "Strong debaters anticipate rebuttals before they are made. \
                   Try outlining the other side's best case first."
            .to_string(),
        scores: ReportScores {
            argument_strength: 6,
            evidence_quality: 5,
            rebuttal_effectiveness: 6,
            clarity: 7,
        },
        winner: Winner::Tie,
        choices_made: None,
        user_stance: None,
        rounds_watched: None,
    }
}

/// Report for a finished AI-vs-AI playback.
pub fn playback_report(rounds_watched: i32) -> ReportContent {
    ReportContent {
        overall_analysis: format!(
            "You watched {rounds_watched} rounds of an AI-versus-AI debate covering \
             both sides of the topic."
        ),
        strengths: "Both sides stated their positions and responded to each other's \
                    main arguments."
            .to_string(),
        improvements: "Consider which arguments relied on evidence and which relied \
                       on rhetoric alone."
            .to_string(),
        insights: "Watching both sides argue helps reveal the assumptions each \
                   position depends on."
            .to_string(),
        scores: ReportScores {
            argument_strength: 7,
            evidence_quality: 7,
            rebuttal_effectiveness: 7,
            clarity: 8,
        },
        winner: Winner::Tie,
        choices_made: None,
        user_stance: None,
        rounds_watched: Some(rounds_watched),
    }
}

/// Report for a finished MCQ walk.
pub fn tree_walk_report(choices_made: i32, user_stance: Stance) -> ReportContent {
    ReportContent {
        overall_analysis: format!(
            "You made {choices_made} choices while arguing {} the topic.",
            user_stance.as_str()
        ),
        strengths: "You stayed with your declared stance while responding to the \
                    AI's counterpoints."
            .to_string(),
        improvements: "Revisit the options you did not pick and consider how they \
                       would have changed the exchange."
            .to_string(),
        insights: "Each choice shapes the direction of a debate. Try the opposite \
                   stance to see the other tree."
            .to_string(),
        scores: ReportScores {
            argument_strength: 7,
            evidence_quality: 6,
            rebuttal_effectiveness: 7,
            clarity: 8,
        },
        winner: Winner::Tie,
        choices_made: Some(choices_made),
        user_stance: Some(user_stance),
        rounds_watched: None,
    }
}

// ---------------------------------------------------------------------------
// LLM reply parsing
// ---------------------------------------------------------------------------

/// Prose fields may come back as a string or a list of bullet strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextOrList {
    Text(String),
    List(Vec<String>),
}

impl TextOrList {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::List(items) => items.join("\n"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScores {
    argument_strength: f64,
    evidence_quality: f64,
    rebuttal_effectiveness: f64,
    clarity: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReport {
    overall_analysis: TextOrList,
    strengths: TextOrList,
    improvements: TextOrList,
    insights: TextOrList,
    scores: RawScores,
    winner: String,
}

/// Remove a surrounding Markdown code fence (```json ... ```), if present.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with("```") {
        trimmed
            .trim_start_matches("```json")
            .trim_start_matches("```JSON")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim()
    } else {
        trimmed
    }
}

/// Clamp a model-provided score into `MIN_SCORE..=MAX_SCORE`.
pub fn clamp_score(value: f64) -> i32 {
    if value.is_nan() {
        return MIN_SCORE;
    }
    (value.round() as i32).clamp(MIN_SCORE, MAX_SCORE)
}

/// Parse the LLM's report reply.
pub fn parse_report_response(raw: &str) -> Result<ReportContent, String> {
    let json = strip_code_fence(raw);
    let parsed: RawReport =
        serde_json::from_str(json).map_err(|e| format!("Report is not valid JSON: {e}"))?;

    Ok(ReportContent {
        overall_analysis: parsed.overall_analysis.into_text(),
        strengths: parsed.strengths.into_text(),
        improvements: parsed.improvements.into_text(),
        insights: parsed.insights.into_text(),
        scores: ReportScores {
            argument_strength: clamp_score(parsed.scores.argument_strength),
            evidence_quality: clamp_score(parsed.scores.evidence_quality),
            rebuttal_effectiveness: clamp_score(parsed.scores.rebuttal_effectiveness),
            clarity: clamp_score(parsed.scores.clarity),
        },
        winner: Winner::from_loose(&parsed.winner),
        choices_made: None,
        user_stance: None,
        rounds_watched: None,
    })
}
