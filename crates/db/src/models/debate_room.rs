//! Debate room models.
//!
//! One room per debate session. Mode-specific columns (`topic_id`,
//! `tree_type`, `user_stance`, `current_response_id`) are null for modes that
//! do not use them.

use rostrum_core::debate::{DebateType, RoomStatus, Stance, TreeType};
use rostrum_core::error::CoreError;
use rostrum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `debate_rooms` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DebateRoom {
    pub id: DbId,
    pub user_id: DbId,
    pub topic: String,
    pub topic_id: Option<DbId>,
    pub debate_type: String,
    pub user_position: Option<String>,
    pub ai_position: Option<String>,
    pub status: String,
    pub conversation_turn: i32,
    pub max_turns: i32,
    pub tree_type: Option<String>,
    pub user_stance: Option<String>,
    pub current_response_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl DebateRoom {
    pub fn debate_type(&self) -> Result<DebateType, CoreError> {
        DebateType::from_str_value(&self.debate_type).map_err(CoreError::Internal)
    }

    pub fn status(&self) -> Result<RoomStatus, CoreError> {
        RoomStatus::from_str_value(&self.status).map_err(CoreError::Internal)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status(), Ok(RoomStatus::Active))
    }

    /// Tree type of an MCQ room.
    pub fn tree_type(&self) -> Result<TreeType, CoreError> {
        let raw = self.tree_type.as_deref().ok_or_else(|| {
            CoreError::Internal(format!("MCQ room {} has no tree type", self.id))
        })?;
        TreeType::from_str_value(raw).map_err(CoreError::Internal)
    }

    /// Declared stance of the user in an MCQ room.
    pub fn user_stance(&self) -> Result<Stance, CoreError> {
        let raw = self.user_stance.as_deref().ok_or_else(|| {
            CoreError::Internal(format!("MCQ room {} has no user stance", self.id))
        })?;
        Stance::from_str_value(raw).map_err(CoreError::Internal)
    }

    /// Topic id of a playback or MCQ room.
    pub fn required_topic_id(&self) -> Result<DbId, CoreError> {
        self.topic_id.ok_or_else(|| {
            CoreError::Internal(format!("Room {} is not linked to a topic", self.id))
        })
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a room. Built by the session-creation handler after
/// validation; never deserialized from clients directly.
#[derive(Debug)]
pub struct CreateDebateRoom {
    pub user_id: DbId,
    pub topic: String,
    pub topic_id: Option<DbId>,
    pub debate_type: DebateType,
    pub user_position: Option<String>,
    pub ai_position: Option<String>,
    pub max_turns: i32,
    pub tree_type: Option<TreeType>,
    pub user_stance: Option<Stance>,
    pub current_response_id: Option<DbId>,
}
