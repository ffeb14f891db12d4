//! Route definitions for debate rooms.
//!
//! ```text
//! GET  /                  list_debates (?limit, offset)
//! POST /                  create_debate
//! GET  /{id}              get_debate
//! POST /{id}/turns        submit_turn
//! GET  /{id}/report       get_report
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::debate;
use crate::state::AppState;

/// Debate routes, mounted at `/debates`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(debate::list_debates).post(debate::create_debate))
        .route("/{id}", get(debate::get_debate))
        .route("/{id}/turns", post(debate::submit_turn))
        .route("/{id}/report", get(debate::get_report))
}
