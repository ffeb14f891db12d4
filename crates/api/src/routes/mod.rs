pub mod debate;
pub mod health;
pub mod topic;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /debates                          list, create (requires auth)
/// /debates/{id}                     room with messages
/// /debates/{id}/turns               submit one action
/// /debates/{id}/report              report of a completed room
///
/// /topics                           list (?group_id)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/debates", debate::router())
        .nest("/topics", topic::router())
}
