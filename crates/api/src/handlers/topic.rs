//! Handlers for debate topics.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use rostrum_db::repositories::DebateTopicRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::TopicListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /topics -- topics, newest first, optionally filtered by news group.
pub async fn list_topics(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<TopicListParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();

    let topics = DebateTopicRepo::list(&state.pool, params.group_id, limit, offset).await?;

    tracing::debug!(count = topics.len(), group_id = ?params.group_id, "Listed debate topics");

    Ok(Json(DataResponse { data: topics }))
}
