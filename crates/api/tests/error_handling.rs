//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values. Only the
//! constraint-mapping tests touch a database, to obtain real Postgres errors.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use rostrum_api::error::AppError;
use rostrum_core::error::CoreError;
use sqlx::PgPool;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "DebateRoom",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "DebateRoom with id 42 not found");
}

#[tokio::test]
async fn invalid_state_returns_409_with_its_own_code() {
    let err = AppError::Core(CoreError::InvalidState(
        "Debate room 3 is already completed".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_STATE");
    assert_eq!(json["error"], "Debate room 3 is already completed");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("turn already submitted".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("too long".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "too long");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("unknown action".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Missing Authorization header".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("connection string with password".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

async fn insert_room(pool: &PgPool, turn: i32, max_turns: i32) -> sqlx::Error {
    sqlx::query(
        "INSERT INTO debate_rooms (user_id, topic, debate_type, conversation_turn, max_turns)
         VALUES (1, 'Topic', 'user_vs_ai', $1, $2)",
    )
    .bind(turn)
    .bind(max_turns)
    .execute(pool)
    .await
    .expect_err("insert should violate a check constraint")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn named_check_violation_is_invalid_state(pool: PgPool) {
    let err = insert_room(&pool, 8, 7).await;

    let (status, json) = error_to_response(AppError::Database(err)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_STATE");
    assert_eq!(json["error"], "Change violates ck_debate_rooms_turn_bounds");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unnamed_check_violation_stays_internal(pool: PgPool) {
    let err = insert_room(&pool, 0, 0).await;

    let (status, json) = error_to_response(AppError::Database(err)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}
