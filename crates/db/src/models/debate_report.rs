//! Debate report models.

use rostrum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `debate_reports` table. Exactly one per completed room.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DebateReport {
    pub id: DbId,
    pub room_id: DbId,
    pub overall_analysis: String,
    pub strengths: String,
    pub improvements: String,
    pub insights: String,
    pub argument_strength: i32,
    pub evidence_quality: i32,
    pub rebuttal_effectiveness: i32,
    pub clarity: i32,
    pub winner: String,
    pub choices_made: Option<i32>,
    pub user_stance: Option<String>,
    pub rounds_watched: Option<i32>,
    pub created_at: Timestamp,
}
