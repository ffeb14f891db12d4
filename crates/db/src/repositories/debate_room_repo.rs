//! Repository for the `debate_rooms` table.

use rostrum_core::types::DbId;
use sqlx::PgPool;

use crate::models::debate_room::{CreateDebateRoom, DebateRoom};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, topic, topic_id, debate_type, user_position, ai_position, \
                       status, conversation_turn, max_turns, tree_type, user_stance, \
                       current_response_id, created_at, updated_at, completed_at";

/// Room lifecycle: creation, owner-scoped reads, and turn claiming.
pub struct DebateRoomRepo;

impl DebateRoomRepo {
    /// Insert a new active room with its turn counter at 0.
    pub async fn create(pool: &PgPool, input: &CreateDebateRoom) -> Result<DebateRoom, sqlx::Error> {
        let query = format!(
            "INSERT INTO debate_rooms
                (user_id, topic, topic_id, debate_type, user_position, ai_position,
                 max_turns, tree_type, user_stance, current_response_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DebateRoom>(&query)
            .bind(input.user_id)
            .bind(&input.topic)
            .bind(input.topic_id)
            .bind(input.debate_type.as_str())
            .bind(&input.user_position)
            .bind(&input.ai_position)
            .bind(input.max_turns)
            .bind(input.tree_type.map(|t| t.as_str()))
            .bind(input.user_stance.map(|s| s.as_str()))
            .bind(input.current_response_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DebateRoom>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM debate_rooms WHERE id = $1");
        sqlx::query_as::<_, DebateRoom>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a room only if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<DebateRoom>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM debate_rooms WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, DebateRoom>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// A user's rooms, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DebateRoom>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM debate_rooms
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, DebateRoom>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Advance the turn counter by one if the room is still active and its
    /// counter is still `expected_turn`. For MCQ rooms `next_response_id`
    /// moves the room to the node shown next in the same statement.
    ///
    /// Returns `None` when another request already advanced the room, the room
    /// completed, or the counter is at `max_turns`. The caller owns the
    /// returned turn number.
    pub async fn claim_turn(
        pool: &PgPool,
        id: DbId,
        expected_turn: i32,
        next_response_id: Option<DbId>,
    ) -> Result<Option<DebateRoom>, sqlx::Error> {
        let query = format!(
            "UPDATE debate_rooms
             SET conversation_turn = conversation_turn + 1,
                 current_response_id = COALESCE($3, current_response_id),
                 updated_at = NOW()
             WHERE id = $1
               AND status = 'active'
               AND conversation_turn = $2
               AND conversation_turn < max_turns
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DebateRoom>(&query)
            .bind(id)
            .bind(expected_turn)
            .bind(next_response_id)
            .fetch_optional(pool)
            .await
    }
}
