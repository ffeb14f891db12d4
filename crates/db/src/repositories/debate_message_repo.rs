//! Repository for the `debate_messages` table (append-only).

use rostrum_core::types::DbId;
use sqlx::PgPool;

use crate::models::debate_message::{CreateDebateMessage, DebateMessage};

const COLUMNS: &str = "id, room_id, sender, turn_number, content, created_at";

pub struct DebateMessageRepo;

impl DebateMessageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateDebateMessage<'_>,
    ) -> Result<DebateMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO debate_messages (room_id, sender, turn_number, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DebateMessage>(&query)
            .bind(input.room_id)
            .bind(input.sender.as_str())
            .bind(input.turn_number)
            .bind(input.content)
            .fetch_one(pool)
            .await
    }

    /// All messages of a room, oldest first.
    pub async fn list_by_room(pool: &PgPool, room_id: DbId) -> Result<Vec<DebateMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM debate_messages
             WHERE room_id = $1
             ORDER BY turn_number, id"
        );
        sqlx::query_as::<_, DebateMessage>(&query)
            .bind(room_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_room(pool: &PgPool, room_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM debate_messages WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
