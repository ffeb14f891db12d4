//! Repository for the `debate_scripts` table.

use rostrum_core::types::DbId;
use sqlx::PgPool;

use crate::models::debate_script::{CreateScriptLine, ScriptLine};

const COLUMNS: &str = "id, topic_id, round_number, side, persona, content, created_at";

pub struct DebateScriptRepo;

impl DebateScriptRepo {
    pub async fn create(pool: &PgPool, input: &CreateScriptLine) -> Result<ScriptLine, sqlx::Error> {
        let query = format!(
            "INSERT INTO debate_scripts (topic_id, round_number, side, persona, content)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScriptLine>(&query)
            .bind(input.topic_id)
            .bind(input.round_number)
            .bind(&input.side)
            .bind(&input.persona)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// The full stored conversation for a topic in (round, side) order.
    pub async fn list_by_topic(pool: &PgPool, topic_id: DbId) -> Result<Vec<ScriptLine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM debate_scripts
             WHERE topic_id = $1
             ORDER BY round_number, side, id"
        );
        sqlx::query_as::<_, ScriptLine>(&query)
            .bind(topic_id)
            .fetch_all(pool)
            .await
    }
}
