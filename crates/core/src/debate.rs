//! Debate session constants, enums, validation, and action classification.
//!
//! Values stored in the `debate_rooms`, `debate_messages`, and
//! `mcq_responses` text columns must match the `as_str` forms defined here.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a single free-text debate message, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Maximum length of a topic or a declared position, in characters.
pub const MAX_POSITION_LENGTH: usize = 500;

/// Default number of user/AI exchanges in a free-text debate.
pub const DEFAULT_MAX_CONVERSATIONS: i32 = 7;

/// Upper bound a caller may request for `maxConversations`.
pub const MAX_CONVERSATIONS_LIMIT: i32 = 20;

/// Deepest level of a pre-authored MCQ tree. Reaching it ends the session.
pub const MCQ_MAX_LEVEL: i32 = 5;

/// Maximum number of choices in one MCQ session.
pub const MCQ_MAX_TURNS: i32 = MCQ_MAX_LEVEL;

/// The only accepted value of the `action` field of a turn request.
pub const ACTION_SHOW_NEXT: &str = "show_next";

// ---------------------------------------------------------------------------
// Debate type
// ---------------------------------------------------------------------------

/// The three debate modes a room can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateType {
    /// The user argues in free text against LLM-generated rebuttals.
    UserVsAi,
    /// A pre-generated AI-vs-AI conversation revealed round by round.
    AiVsAi,
    /// The user walks a pre-authored multiple-choice tree.
    Mcq,
}

impl DebateType {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "user_vs_ai" => Ok(Self::UserVsAi),
            "ai_vs_ai" => Ok(Self::AiVsAi),
            "mcq" => Ok(Self::Mcq),
            other => Err(format!("Unknown debate type: {other}")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserVsAi => "user_vs_ai",
            Self::AiVsAi => "ai_vs_ai",
            Self::Mcq => "mcq",
        }
    }
}

// ---------------------------------------------------------------------------
// Room status
// ---------------------------------------------------------------------------

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Active,
    Completed,
}

impl RoomStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_ACTIVE => Ok(Self::Active),
            STATUS_COMPLETED => Ok(Self::Completed),
            other => Err(format!("Unknown room status: {other}")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => STATUS_ACTIVE,
            Self::Completed => STATUS_COMPLETED,
        }
    }
}

// ---------------------------------------------------------------------------
// Stance and tree type
// ---------------------------------------------------------------------------

/// The side a user declares when starting an MCQ debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    For,
    Against,
}

impl Stance {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "for" => Ok(Self::For),
            "against" => Ok(Self::Against),
            other => Err(format!("Unknown stance: {other}")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::For => "for",
            Self::Against => "against",
        }
    }
}

/// Which pre-authored branch the AI speaks from in an MCQ session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeType {
    AiFor,
    AiAgainst,
}

impl TreeType {
    /// The AI always argues the opposite of the user.
    pub fn opposing(user_stance: Stance) -> Self {
        match user_stance {
            Stance::For => Self::AiAgainst,
            Stance::Against => Self::AiFor,
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "ai_for" => Ok(Self::AiFor),
            "ai_against" => Ok(Self::AiAgainst),
            other => Err(format!("Unknown tree type: {other}")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiFor => "ai_for",
            Self::AiAgainst => "ai_against",
        }
    }
}

// ---------------------------------------------------------------------------
// Message sender
// ---------------------------------------------------------------------------

pub const SENDER_USER: &str = "user";
pub const SENDER_AI: &str = "ai";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            SENDER_USER => Ok(Self::User),
            SENDER_AI => Ok(Self::Ai),
            other => Err(format!("Unknown sender: {other}")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => SENDER_USER,
            Self::Ai => SENDER_AI,
        }
    }
}

// ---------------------------------------------------------------------------
// Turn actions
// ---------------------------------------------------------------------------

/// One client action against a debate room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// A free-text user message (user-vs-AI rooms).
    FreeText(String),
    /// Reveal the next scripted round (AI-vs-AI rooms).
    RevealNext,
    /// Pick one option of the current MCQ node.
    SelectOption(DbId),
}

impl ActionKind {
    /// Classify the raw fields of a turn request.
    ///
    /// Exactly one of the three shapes must be present.
    pub fn classify(
        content: Option<String>,
        action: Option<&str>,
        selected_option_id: Option<DbId>,
    ) -> Result<Self, String> {
        match (content, action, selected_option_id) {
            (Some(text), None, None) => Ok(Self::FreeText(text)),
            (None, Some(ACTION_SHOW_NEXT), None) => Ok(Self::RevealNext),
            (None, Some(other), None) => Err(format!(
                "Unknown action '{other}'. Expected '{ACTION_SHOW_NEXT}'"
            )),
            (None, None, Some(id)) => Ok(Self::SelectOption(id)),
            (None, None, None) => Err(
                "Request must contain one of: content, action, selectedOptionId".to_string(),
            ),
            _ => Err(
                "Request must contain only one of: content, action, selectedOptionId".to_string(),
            ),
        }
    }

    /// The debate mode this action belongs to.
    pub fn debate_type(&self) -> DebateType {
        match self {
            Self::FreeText(_) => DebateType::UserVsAi,
            Self::RevealNext => DebateType::AiVsAi,
            Self::SelectOption(_) => DebateType::Mcq,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a free-text debate message and return it trimmed.
pub fn validate_message(content: &str) -> Result<&str, CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Message content must not be empty".to_string(),
        ));
    }
    let len = trimmed.chars().count();
    if len > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message must not exceed {MAX_MESSAGE_LENGTH} characters, got {len}"
        )));
    }
    Ok(trimmed)
}

/// Validate a required text field such as the topic or a declared position.
pub fn validate_required_text<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_POSITION_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {MAX_POSITION_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}

/// Validate the requested number of exchanges for a free-text debate.
pub fn validate_max_conversations(value: i32) -> Result<i32, CoreError> {
    if !(1..=MAX_CONVERSATIONS_LIMIT).contains(&value) {
        return Err(CoreError::Validation(format!(
            "maxConversations must be between 1 and {MAX_CONVERSATIONS_LIMIT}, got {value}"
        )));
    }
    Ok(value)
}

/// Turns left after `turn` of `max_turns`, never negative.
pub fn remaining_turns(turn: i32, max_turns: i32) -> i32 {
    (max_turns - turn).max(0)
}
