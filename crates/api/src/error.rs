//! HTTP error mapping.
//!
//! Every failure leaves the API as `{ "error": <message>, "code": <CODE> }`.
//! Messages of 5xx responses are replaced with a generic sentence; the
//! original is logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rostrum_core::error::CoreError;
use serde_json::json;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error type of every handler and engine function.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request is well-formed JSON but not a valid action or body.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Stored data contradicts itself (e.g. a playback room longer than its
    /// script).
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Status, machine-readable code and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Inconsistent debate data");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn core_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::InvalidState(msg) => (StatusCode::CONFLICT, "INVALID_STATE", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Internal(msg) => {
            // Raised when a stored enum column no longer parses.
            tracing::error!(error = %msg, "Corrupt debate record");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Map a sqlx error onto the API's error codes.
///
/// - `RowNotFound` is 404.
/// - A unique violation on a `uq_` constraint is 409 `CONFLICT`.
/// - A check violation on a named `ck_` constraint (turn bounds, tree shape)
///   is 409 `INVALID_STATE`.
/// - Anything else is a sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return (StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found".to_string());
        }
        sqlx::Error::Database(db_err) => db_err,
        other => {
            tracing::error!(error = %other, "Database error");
            return internal();
        }
    };

    let constraint = db_err.constraint().unwrap_or_default();
    match db_err.code().as_deref() {
        // unique_violation
        Some("23505") if constraint.starts_with("uq_") => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        // check_violation
        Some("23514") if constraint.starts_with("ck_") => (
            StatusCode::CONFLICT,
            "INVALID_STATE",
            format!("Change violates {constraint}"),
        ),
        _ => {
            tracing::error!(error = %db_err, constraint, "Database error");
            internal()
        }
    }
}
