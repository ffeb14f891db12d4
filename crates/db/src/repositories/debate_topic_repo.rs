//! Repository for the `debate_topics` table.

use rostrum_core::types::DbId;
use sqlx::PgPool;

use crate::models::debate_topic::{CreateDebateTopic, DebateTopic};

const COLUMNS: &str = "id, group_id, title, created_at";

/// Topic lookups. Topics are authored elsewhere; `create` exists for seeding.
pub struct DebateTopicRepo;

impl DebateTopicRepo {
    pub async fn create(pool: &PgPool, input: &CreateDebateTopic) -> Result<DebateTopic, sqlx::Error> {
        let query = format!(
            "INSERT INTO debate_topics (group_id, title) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DebateTopic>(&query)
            .bind(input.group_id)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// The most recently created topic for a news group.
    pub async fn find_latest_by_group(
        pool: &PgPool,
        group_id: DbId,
    ) -> Result<Option<DebateTopic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM debate_topics
             WHERE group_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, DebateTopic>(&query)
            .bind(group_id)
            .fetch_optional(pool)
            .await
    }

    /// List topics, newest first, optionally restricted to one group.
    pub async fn list(
        pool: &PgPool,
        group_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DebateTopic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM debate_topics
             WHERE ($1::BIGINT IS NULL OR group_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, DebateTopic>(&query)
            .bind(group_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
