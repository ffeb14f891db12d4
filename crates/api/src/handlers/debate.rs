//! Handlers for debate rooms.
//!
//! Thin wrappers over the engine: extract, authorize, delegate, wrap the
//! result in the `{ data }` envelope.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use rostrum_core::debate::{ActionKind, DebateType};
use rostrum_core::error::CoreError;
use rostrum_core::types::DbId;
use rostrum_db::repositories::{DebateMessageRepo, DebateReportRepo, DebateRoomRepo};

use crate::engine::dispatcher::{dispatch_turn, load_owned_room};
use crate::engine::session::{create_debate as create_session, CreateDebateRequest};
use crate::engine::tree_walk::current_question;
use crate::engine::views::DebateDetail;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /debates/{id}/turns`. Exactly one field must be set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub content: Option<String>,
    pub action: Option<String>,
    pub selected_option_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// GET /debates
// ---------------------------------------------------------------------------

/// List the caller's rooms, newest first.
pub async fn list_debates(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.resolve();
    let rooms = DebateRoomRepo::list_by_user(&state.pool, auth.user_id, limit, offset).await?;

    tracing::debug!(count = rooms.len(), user_id = auth.user_id, "Listed debate rooms");

    Ok(Json(DataResponse { data: rooms }))
}

// ---------------------------------------------------------------------------
// POST /debates
// ---------------------------------------------------------------------------

/// Start a debate in any of the three modes.
pub async fn create_debate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateDebateRequest>,
) -> AppResult<impl IntoResponse> {
    let created = create_session(&state, auth.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /debates/{id}
// ---------------------------------------------------------------------------

/// A room with its messages, its report once completed, and for MCQ rooms in
/// progress the question being answered.
pub async fn get_debate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let room = load_owned_room(&state.pool, id, auth.user_id).await?;
    let messages = DebateMessageRepo::list_by_room(&state.pool, room.id).await?;
    let report = DebateReportRepo::find_by_room(&state.pool, room.id).await?;

    let current_question = if room.is_active() && room.debate_type()? == DebateType::Mcq {
        current_question(&state, &room).await?
    } else {
        None
    };

    Ok(Json(DataResponse {
        data: DebateDetail {
            room,
            messages,
            current_question,
            report,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /debates/{id}/turns
// ---------------------------------------------------------------------------

/// Submit one action: a message, `show_next`, or an option selection.
pub async fn submit_turn(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<TurnRequest>,
) -> AppResult<impl IntoResponse> {
    let action = ActionKind::classify(body.content, body.action.as_deref(), body.selected_option_id)
        .map_err(AppError::BadRequest)?;

    let outcome = dispatch_turn(&state, auth.user_id, id, action).await?;

    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// GET /debates/{id}/report
// ---------------------------------------------------------------------------

/// The report of a completed room.
pub async fn get_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let room = load_owned_room(&state.pool, id, auth.user_id).await?;
    let report = DebateReportRepo::find_by_room(&state.pool, room.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DebateReport for room",
            id: room.id,
        }))?;

    Ok(Json(DataResponse { data: report }))
}
