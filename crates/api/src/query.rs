//! Shared query parameter types for API handlers.

use serde::Deserialize;

use rostrum_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use rostrum_core::types::DbId;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)` ready for a repository call.
    pub fn resolve(&self) -> (i64, i64) {
        resolve_page(self.limit, self.offset)
    }
}

/// Query parameters for the topic listing (`?group_id=&limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct TopicListParams {
    pub group_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TopicListParams {
    /// Clamped `(limit, offset)`, same bounds as [`PaginationParams`].
    pub fn resolve(&self) -> (i64, i64) {
        resolve_page(self.limit, self.offset)
    }
}

fn resolve_page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        clamp_offset(offset),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_params_clamp_like_pagination() {
        let topics = TopicListParams {
            group_id: Some(4),
            limit: Some(MAX_PAGE_SIZE + 50),
            offset: Some(-3),
        };
        let page = PaginationParams {
            limit: topics.limit,
            offset: topics.offset,
        };
        assert_eq!(topics.resolve(), (MAX_PAGE_SIZE, 0));
        assert_eq!(topics.resolve(), page.resolve());
    }

    #[test]
    fn missing_values_use_defaults() {
        let params = TopicListParams {
            group_id: None,
            limit: None,
            offset: None,
        };
        assert_eq!(params.resolve(), (DEFAULT_PAGE_SIZE, 0));
    }
}
