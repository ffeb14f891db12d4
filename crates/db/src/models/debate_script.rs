//! Scripted AI-vs-AI conversation lines.

use rostrum_core::playback::RoundOrdered;
use rostrum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `debate_scripts` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScriptLine {
    pub id: DbId,
    pub topic_id: DbId,
    pub round_number: i32,
    pub side: String,
    pub persona: String,
    pub content: String,
    pub created_at: Timestamp,
}

impl RoundOrdered for ScriptLine {
    fn round_number(&self) -> i32 {
        self.round_number
    }

    fn side(&self) -> &str {
        &self.side
    }
}

/// Input for storing one scripted line.
#[derive(Debug, Deserialize)]
pub struct CreateScriptLine {
    pub topic_id: DbId,
    pub round_number: i32,
    pub side: String,
    pub persona: String,
    pub content: String,
}
