//! Shared helpers for HTTP integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use rostrum_api::auth::jwt::{generate_access_token, JwtConfig};
use rostrum_api::config::ServerConfig;
use rostrum_api::router::build_app_router;
use rostrum_api::state::AppState;
use rostrum_core::debate::TreeType;
use rostrum_core::types::DbId;
use rostrum_db::models::debate_script::CreateScriptLine;
use rostrum_db::models::debate_topic::{CreateDebateTopic, DebateTopic};
use rostrum_db::models::mcq::{CreateMcqOption, CreateMcqResponse, McqOption, McqResponse};
use rostrum_db::repositories::{DebateScriptRepo, DebateTopicRepo, McqRepo};
use rostrum_llm::mock::MockProvider;
use rostrum_llm::{CompletionProvider, LlmConfig};

const TEST_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        default_max_conversations: 7,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        llm: LlmConfig {
            api_key: None,
            base_url: "http://localhost:0".to_string(),
            model: "test".to_string(),
            timeout_secs: 1,
        },
    }
}

/// Build the full application router (same middleware stack as production)
/// over `pool`, with a provider that always answers `"Counterpoint."`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_llm(pool, Arc::new(MockProvider::constant("Counterpoint.")))
}

/// Build the application router with a specific completion provider.
pub fn build_test_app_with_llm(pool: PgPool, llm: Arc<dyn CompletionProvider>) -> Router {
    build_test_app_with_config(pool, llm, test_config())
}

/// Build the application router with a specific provider and configuration.
pub fn build_test_app_with_config(
    pool: PgPool,
    llm: Arc<dyn CompletionProvider>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        llm,
    };
    build_app_router(state, &config)
}

/// A valid bearer token for `user_id`.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Read the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST and return `(status, json)`.
pub async fn post_expect(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> (StatusCode, serde_json::Value) {
    let response = post_json_auth(app, uri, body, token).await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn seed_topic(pool: &PgPool, group_id: DbId, title: &str) -> DebateTopic {
    DebateTopicRepo::create(
        pool,
        &CreateDebateTopic {
            group_id,
            title: title.to_string(),
        },
    )
    .await
    .expect("topic insert should succeed")
}

/// Store a script line for `topic_id`.
pub async fn seed_line(pool: &PgPool, topic_id: DbId, round: i32, side: &str, content: &str) {
    DebateScriptRepo::create(
        pool,
        &CreateScriptLine {
            topic_id,
            round_number: round,
            side: side.to_string(),
            persona: format!("Persona {side}"),
            content: content.to_string(),
        },
    )
    .await
    .expect("script insert should succeed");
}

pub async fn seed_node(
    pool: &PgPool,
    topic_id: DbId,
    tree_type: TreeType,
    level: i32,
    parent: Option<DbId>,
    message: &str,
) -> McqResponse {
    McqRepo::create_response(
        pool,
        &CreateMcqResponse {
            topic_id,
            tree_type,
            level,
            parent_response_id: parent,
            persona: "Moderator".to_string(),
            message: message.to_string(),
        },
    )
    .await
    .expect("response insert should succeed")
}

pub async fn seed_option(
    pool: &PgPool,
    response_id: DbId,
    letter: &str,
    next: Option<DbId>,
    is_terminal: bool,
) -> McqOption {
    McqRepo::create_option(
        pool,
        &CreateMcqOption {
            response_id,
            option_text: format!("Option {letter}"),
            option_letter: letter.to_string(),
            position: 0,
            next_response_id: next,
            is_terminal,
        },
    )
    .await
    .expect("option insert should succeed")
}

/// Make room `room_id` look like its last turn was claimed `secs_ago` seconds
/// ago by a request that never finished.
pub async fn exhaust_room(pool: &PgPool, room_id: DbId, secs_ago: i64) {
    sqlx::query(
        "UPDATE debate_rooms
         SET conversation_turn = max_turns,
             updated_at = NOW() - make_interval(secs => $2)
         WHERE id = $1",
    )
    .bind(room_id)
    .bind(secs_ago as f64)
    .execute(pool)
    .await
    .expect("room update should succeed");
}
