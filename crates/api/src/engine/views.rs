//! Response payloads of the debate endpoints (camelCase on the wire).

use rostrum_core::debate::TreeType;
use rostrum_core::tree_walk::{EndReason, ResolveTier};
use rostrum_core::types::DbId;
use rostrum_db::models::debate_message::DebateMessage;
use rostrum_db::models::debate_report::DebateReport;
use rostrum_db::models::debate_room::DebateRoom;
use rostrum_db::models::debate_script::ScriptLine;
use rostrum_db::models::mcq::{McqOption, McqResponse};
use serde::Serialize;

// ---------------------------------------------------------------------------
// MCQ nodes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McqOptionView {
    pub id: DbId,
    pub text: String,
    pub letter: String,
    pub is_terminal: bool,
}

impl From<McqOption> for McqOptionView {
    fn from(o: McqOption) -> Self {
        Self {
            id: o.id,
            text: o.option_text,
            letter: o.option_letter,
            is_terminal: o.is_terminal,
        }
    }
}

/// One AI message of a tree together with the user's possible replies.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McqNodeView {
    pub id: DbId,
    pub message: String,
    pub persona: String,
    pub level: i32,
    pub options: Vec<McqOptionView>,
}

impl McqNodeView {
    pub fn new(node: McqResponse, options: Vec<McqOption>) -> Self {
        Self {
            id: node.id,
            message: node.message,
            persona: node.persona,
            level: node.level,
            options: options.into_iter().map(McqOptionView::from).collect(),
        }
    }
}

/// Echo of the option the user just picked.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedChoice {
    pub option_id: DbId,
    pub letter: String,
    pub text: String,
}

impl From<&McqOption> for SelectedChoice {
    fn from(o: &McqOption) -> Self {
        Self {
            option_id: o.id,
            letter: o.option_letter.clone(),
            text: o.option_text.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Turn responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeTextTurn {
    pub user_message: DebateMessage,
    pub ai_response: DebateMessage,
    pub debate_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DebateReport>,
    pub conversation_turn: i32,
    pub remaining_turns: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackTurn {
    pub round: i32,
    pub lines: Vec<ScriptLine>,
    pub debate_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DebateReport>,
    pub conversation_turn: i32,
    pub remaining_turns: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeWalkTurn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<McqNodeView>,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DebateReport>,
    pub current_level: i32,
    pub remaining_levels: i32,
    /// Absent only when the walk is finished without a new selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_choice: Option<SelectedChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<EndReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<ResolveTier>,
}

/// Reply to an action on a room whose final turn was used up by an earlier
/// request that never finished it. Carries both completion flags so clients
/// of every mode see the session end.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveredTurn {
    pub debate_completed: bool,
    pub is_completed: bool,
    pub report: DebateReport,
    pub conversation_turn: i32,
    pub remaining_turns: i32,
}

impl RecoveredTurn {
    pub fn new(room: &DebateRoom, report: DebateReport) -> Self {
        Self {
            debate_completed: true,
            is_completed: true,
            report,
            conversation_turn: room.conversation_turn,
            remaining_turns: 0,
        }
    }
}

/// Result of one dispatched action; serialized as the mode's own shape.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TurnOutcome {
    FreeText(FreeTextTurn),
    Playback(PlaybackTurn),
    TreeWalk(TreeWalkTurn),
    Recovered(RecoveredTurn),
}

// ---------------------------------------------------------------------------
// Room responses
// ---------------------------------------------------------------------------

/// A freshly created room plus whatever the mode shows first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDebate {
    pub room: DebateRoom,
    /// Free text: the AI's opening statement (turn 0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_message: Option<DebateMessage>,
    /// Playback: the full scripted conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<Vec<ScriptLine>>,
    /// MCQ: the tree the AI speaks from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_type: Option<TreeType>,
    /// MCQ: the root node and its options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_question: Option<McqNodeView>,
}

impl CreatedDebate {
    pub fn new(room: DebateRoom) -> Self {
        Self {
            room,
            opening_message: None,
            script: None,
            tree_type: None,
            first_question: None,
        }
    }
}

/// A room with its transcript and, once completed, its report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateDetail {
    pub room: DebateRoom,
    pub messages: Vec<DebateMessage>,
    /// MCQ rooms still in progress: the node the user is answering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<McqNodeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DebateReport>,
}
