//! Free-text debate messages (append-only).

use rostrum_core::debate::Sender;
use rostrum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `debate_messages` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DebateMessage {
    pub id: DbId,
    pub room_id: DbId,
    pub sender: String,
    pub turn_number: i32,
    pub content: String,
    pub created_at: Timestamp,
}

impl DebateMessage {
    /// Parsed sender; rows are CHECK-constrained so unknown values mean the
    /// user side.
    pub fn sender(&self) -> Sender {
        Sender::from_str_value(&self.sender).unwrap_or(Sender::User)
    }
}

/// Input for appending a message.
#[derive(Debug)]
pub struct CreateDebateMessage<'a> {
    pub room_id: DbId,
    pub sender: Sender,
    pub turn_number: i32,
    pub content: &'a str,
}
