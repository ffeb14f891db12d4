//! MCQ tree models: pre-authored AI response nodes and their options.

use rostrum_core::debate::TreeType;
use rostrum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A row from the `mcq_responses` table: one AI utterance in a tree.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct McqResponse {
    pub id: DbId,
    pub topic_id: DbId,
    pub tree_type: String,
    pub level: i32,
    pub parent_response_id: Option<DbId>,
    pub persona: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// A row from the `mcq_options` table: one selectable reply.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct McqOption {
    pub id: DbId,
    pub response_id: DbId,
    pub option_text: String,
    pub option_letter: String,
    pub position: i32,
    pub next_response_id: Option<DbId>,
    pub is_terminal: bool,
}

// ---------------------------------------------------------------------------
// Create DTOs (content authoring and test fixtures)
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct CreateMcqResponse {
    pub topic_id: DbId,
    pub tree_type: TreeType,
    pub level: i32,
    pub parent_response_id: Option<DbId>,
    pub persona: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateMcqOption {
    pub response_id: DbId,
    pub option_text: String,
    pub option_letter: String,
    pub position: i32,
    pub next_response_id: Option<DbId>,
    pub is_terminal: bool,
}
