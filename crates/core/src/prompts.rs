//! Prompt templates for free-text debates.
//!
//! Each builder returns a `(system, user)` pair for a single chat-completion
//! call. Keep the JSON keys in [`REPORT_INSTRUCTIONS`] in sync with
//! `report::parse_report_response`.

use crate::debate::Sender;

/// Substituted for a rebuttal when the LLM call fails.
pub const FALLBACK_REBUTTAL: &str =
    "That's an interesting point, but I believe there are other perspectives to consider.";

/// Substituted for the opening statement when the LLM call fails.
pub const FALLBACK_OPENING: &str =
    "I'm ready to debate. Please present your opening argument.";

const REBUTTAL_INSTRUCTIONS: &str = "You are a sharp but respectful debate opponent. \
Argue only for your assigned position. Respond directly to the user's latest point, \
challenge its weakest assumption, and add one new argument. Reply in plain text, \
at most three sentences, with no preamble.";

const OPENING_INSTRUCTIONS: &str = "You are a sharp but respectful debate opponent. \
Open the debate with a short statement of your assigned position (two sentences at most) \
and invite the user to respond. Reply in plain text.";

const REPORT_INSTRUCTIONS: &str = "You are an impartial debate judge. Evaluate the USER's \
performance in the transcript. Reply with JSON only, no prose, in exactly this shape:
{\"overallAnalysis\": string, \"strengths\": string, \"improvements\": string, \
\"insights\": string, \"scores\": {\"argumentStrength\": 1-10, \"evidenceQuality\": 1-10, \
\"rebuttalEffectiveness\": 1-10, \"clarity\": 1-10}, \"winner\": \"user\" | \"ai\" | \"tie\"}";

/// One utterance of a free-text debate, oldest first.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptLine<'a> {
    pub sender: Sender,
    pub content: &'a str,
}

/// Positions and topic shared by every prompt of one room.
#[derive(Debug, Clone, Copy)]
pub struct DebateFrame<'a> {
    pub topic: &'a str,
    pub user_position: &'a str,
    pub ai_position: &'a str,
}

fn render_transcript(lines: &[TranscriptLine<'_>]) -> String {
    if lines.is_empty() {
        return "(no messages yet)".to_string();
    }
    lines
        .iter()
        .map(|l| {
            let who = match l.sender {
                Sender::User => "USER",
                Sender::Ai => "AI",
            };
            format!("{who}: {}", l.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_frame(frame: &DebateFrame<'_>) -> String {
    format!(
        "Topic: {}\nUser's position: {}\nYour position: {}",
        frame.topic, frame.user_position, frame.ai_position
    )
}

/// Prompt for the AI's opening statement at room creation.
pub fn opening_prompt(frame: &DebateFrame<'_>) -> (String, String) {
    (OPENING_INSTRUCTIONS.to_string(), render_frame(frame))
}

/// Prompt for the AI's rebuttal; `history` includes the newest user message.
pub fn rebuttal_prompt(frame: &DebateFrame<'_>, history: &[TranscriptLine<'_>]) -> (String, String) {
    let user = format!(
        "{}\n\nConversation so far:\n{}\n\nWrite your rebuttal.",
        render_frame(frame),
        render_transcript(history)
    );
    (REBUTTAL_INSTRUCTIONS.to_string(), user)
}

/// Prompt for the closing report of a free-text room.
pub fn report_prompt(frame: &DebateFrame<'_>, transcript: &[TranscriptLine<'_>]) -> (String, String) {
    let user = format!(
        "Topic: {}\nUser's position: {}\nAI's position: {}\n\nTranscript:\n{}",
        frame.topic,
        frame.user_position,
        frame.ai_position,
        render_transcript(transcript)
    );
    (REPORT_INSTRUCTIONS.to_string(), user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DebateFrame<'static> {
        DebateFrame {
            topic: "Four-day work week",
            user_position: "It raises productivity",
            ai_position: "It hurts service industries",
        }
    }

    #[test]
    fn rebuttal_prompt_carries_full_history() {
        let history = [
            TranscriptLine { sender: Sender::Ai, content: "Opening." },
            TranscriptLine { sender: Sender::User, content: "Pilots show gains." },
        ];
        let (system, user) = rebuttal_prompt(&frame(), &history);

        assert!(system.contains("assigned position"));
        assert!(user.contains("Four-day work week"));
        assert!(user.contains("AI: Opening.\nUSER: Pilots show gains."));
    }

    #[test]
    fn report_prompt_asks_for_json_keys() {
        let (system, user) = report_prompt(&frame(), &[]);
        for key in ["overallAnalysis", "argumentStrength", "winner"] {
            assert!(system.contains(key), "missing {key}");
        }
        assert!(user.contains("(no messages yet)"));
    }
}
