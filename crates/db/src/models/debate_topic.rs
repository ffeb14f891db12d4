//! Debate topic models.

use rostrum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `debate_topics` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DebateTopic {
    pub id: DbId,
    /// The news group this topic was derived from.
    pub group_id: DbId,
    pub title: String,
    pub created_at: Timestamp,
}

/// Input for creating a topic.
#[derive(Debug, Deserialize)]
pub struct CreateDebateTopic {
    pub group_id: DbId,
    pub title: String,
}
