//! Repository for the `mcq_responses` and `mcq_options` tables.
//!
//! Trees are read-only to the debate flow; the `create_*` methods exist for
//! content import and test fixtures.

use async_trait::async_trait;
use rostrum_core::debate::TreeType;
use rostrum_core::tree_walk::NodeLookup;
use rostrum_core::types::DbId;
use sqlx::PgPool;

use crate::models::mcq::{CreateMcqOption, CreateMcqResponse, McqOption, McqResponse};

const RESPONSE_COLUMNS: &str =
    "id, topic_id, tree_type, level, parent_response_id, persona, message, created_at";

const OPTION_COLUMNS: &str =
    "id, response_id, option_text, option_letter, position, next_response_id, is_terminal";

pub struct McqRepo;

impl McqRepo {
    // -----------------------------------------------------------------------
    // Responses
    // -----------------------------------------------------------------------

    pub async fn create_response(
        pool: &PgPool,
        input: &CreateMcqResponse,
    ) -> Result<McqResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO mcq_responses (topic_id, tree_type, level, parent_response_id, persona, message)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {RESPONSE_COLUMNS}"
        );
        sqlx::query_as::<_, McqResponse>(&query)
            .bind(input.topic_id)
            .bind(input.tree_type.as_str())
            .bind(input.level)
            .bind(input.parent_response_id)
            .bind(&input.persona)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_response(pool: &PgPool, id: DbId) -> Result<Option<McqResponse>, sqlx::Error> {
        let query = format!("SELECT {RESPONSE_COLUMNS} FROM mcq_responses WHERE id = $1");
        sqlx::query_as::<_, McqResponse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The level-1 root of a topic's tree.
    pub async fn find_root(
        pool: &PgPool,
        topic_id: DbId,
        tree_type: TreeType,
    ) -> Result<Option<McqResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM mcq_responses
             WHERE topic_id = $1 AND tree_type = $2 AND level = 1 AND parent_response_id IS NULL"
        );
        sqlx::query_as::<_, McqResponse>(&query)
            .bind(topic_id)
            .bind(tree_type.as_str())
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Options
    // -----------------------------------------------------------------------

    pub async fn create_option(pool: &PgPool, input: &CreateMcqOption) -> Result<McqOption, sqlx::Error> {
        let query = format!(
            "INSERT INTO mcq_options
                (response_id, option_text, option_letter, position, next_response_id, is_terminal)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {OPTION_COLUMNS}"
        );
        sqlx::query_as::<_, McqOption>(&query)
            .bind(input.response_id)
            .bind(&input.option_text)
            .bind(&input.option_letter)
            .bind(input.position)
            .bind(input.next_response_id)
            .bind(input.is_terminal)
            .fetch_one(pool)
            .await
    }

    pub async fn find_option(pool: &PgPool, id: DbId) -> Result<Option<McqOption>, sqlx::Error> {
        let query = format!("SELECT {OPTION_COLUMNS} FROM mcq_options WHERE id = $1");
        sqlx::query_as::<_, McqOption>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Options of a node in display order.
    pub async fn list_options(pool: &PgPool, response_id: DbId) -> Result<Vec<McqOption>, sqlx::Error> {
        let query = format!(
            "SELECT {OPTION_COLUMNS} FROM mcq_options
             WHERE response_id = $1
             ORDER BY position, option_letter, id"
        );
        sqlx::query_as::<_, McqOption>(&query)
            .bind(response_id)
            .fetch_all(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Tree lookup
// ---------------------------------------------------------------------------

/// [`NodeLookup`] over the `mcq_responses` table.
pub struct McqTreeLookup<'a> {
    pool: &'a PgPool,
}

impl<'a> McqTreeLookup<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NodeLookup for McqTreeLookup<'_> {
    type Node = McqResponse;
    type Error = sqlx::Error;

    async fn find_in_tree(
        &self,
        node_id: DbId,
        topic_id: DbId,
        tree_type: TreeType,
    ) -> Result<Option<McqResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM mcq_responses
             WHERE id = $1 AND topic_id = $2 AND tree_type = $3"
        );
        sqlx::query_as::<_, McqResponse>(&query)
            .bind(node_id)
            .bind(topic_id)
            .bind(tree_type.as_str())
            .fetch_optional(self.pool)
            .await
    }

    async fn find_child(
        &self,
        topic_id: DbId,
        tree_type: TreeType,
        parent_id: DbId,
        level: i32,
    ) -> Result<Option<McqResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM mcq_responses
             WHERE topic_id = $1 AND tree_type = $2 AND parent_response_id = $3 AND level = $4
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, McqResponse>(&query)
            .bind(topic_id)
            .bind(tree_type.as_str())
            .bind(parent_id)
            .bind(level)
            .fetch_optional(self.pool)
            .await
    }

    async fn find_at_level(
        &self,
        topic_id: DbId,
        tree_type: TreeType,
        level: i32,
    ) -> Result<Option<McqResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {RESPONSE_COLUMNS} FROM mcq_responses
             WHERE topic_id = $1 AND tree_type = $2 AND level = $3
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, McqResponse>(&query)
            .bind(topic_id)
            .bind(tree_type.as_str())
            .bind(level)
            .fetch_optional(self.pool)
            .await
    }
}
