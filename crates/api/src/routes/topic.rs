//! Route definitions for debate topics.
//!
//! ```text
//! GET /                   list_topics (?group_id, limit, offset)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::topic;
use crate::state::AppState;

/// Topic routes, mounted at `/topics`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(topic::list_topics))
}
