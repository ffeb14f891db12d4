//! HTTP-level integration tests for user-vs-AI free-text debates.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, get_auth, post_expect, post_json_auth, token_for};
use rostrum_core::prompts::{FALLBACK_OPENING, FALLBACK_REBUTTAL};
use rostrum_db::repositories::{DebateMessageRepo, DebateReportRepo, DebateRoomRepo};
use rostrum_llm::mock::MockProvider;
use rostrum_llm::provider::DEFAULT_MAX_TOKENS;
use rostrum_llm::{CompletionProvider, CompletionRequest, LlmError};
use serde_json::json;
use sqlx::PgPool;

const USER: i64 = 101;

const JUDGED_REPORT: &str = r#"```json
{
  "overallAnalysis": "Well argued.",
  "strengths": ["Clear thesis", "Good pacing"],
  "improvements": "Cite sources.",
  "insights": "Anticipate the strongest rebuttal.",
  "scores": {"argumentStrength": 12, "evidenceQuality": 6, "rebuttalEffectiveness": 0, "clarity": 8},
  "winner": "user"
}
```"#;

fn create_body(max_conversations: Option<i32>) -> serde_json::Value {
    let mut body = json!({
        "debateType": "user_vs_ai",
        "topic": "Should cities ban cars downtown?",
        "userPosition": "Yes, it improves air quality",
        "aiPosition": "No, it hurts local businesses",
    });
    if let Some(n) = max_conversations {
        body["maxConversations"] = json!(n);
    }
    body
}

async fn create_room(app: axum::Router, body: serde_json::Value) -> serde_json::Value {
    let (status, json) = post_expect(app, "/api/v1/debates", body, &token_for(USER)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json["data"].clone()
}

fn turns_uri(room_id: &serde_json::Value) -> String {
    format!("/api/v1/debates/{room_id}/turns")
}

// ---------------------------------------------------------------------------
// Full session
// ---------------------------------------------------------------------------

/// Seven exchanges complete the debate with one judged report whose scores
/// are clamped into 1..=10.
#[sqlx::test(migrations = "../../db/migrations")]
async fn seven_exchanges_complete_with_scored_report(pool: PgPool) {
    let mut replies: Vec<Result<String, String>> = vec![Ok("Opening statement.".into())];
    replies.extend((1..=7).map(|i| Ok(format!("Rebuttal {i}."))));
    replies.push(Ok(JUDGED_REPORT.to_string()));
    let app = common::build_test_app_with_llm(pool.clone(), Arc::new(MockProvider::new(replies)));

    let created = create_room(app.clone(), create_body(None)).await;
    assert_eq!(created["room"]["maxTurns"], 7);
    assert_eq!(created["room"]["conversationTurn"], 0);
    assert_eq!(created["openingMessage"]["content"], "Opening statement.");
    assert_eq!(created["openingMessage"]["turnNumber"], 0);
    let room_id = created["room"]["id"].clone();

    for turn in 1..=7 {
        let (status, json) = post_expect(
            app.clone(),
            &turns_uri(&room_id),
            json!({ "content": format!("Argument number {turn}") }),
            &token_for(USER),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "turn {turn}: {json}");

        let data = &json["data"];
        assert_eq!(data["conversationTurn"], turn);
        assert_eq!(data["remainingTurns"], 7 - turn);
        assert_eq!(data["userMessage"]["sender"], "user");
        assert_eq!(data["aiResponse"]["sender"], "ai");
        assert_eq!(data["aiResponse"]["content"], format!("Rebuttal {turn}."));

        if turn < 7 {
            assert_eq!(data["debateCompleted"], false);
            assert!(data.get("report").is_none());
        } else {
            assert_eq!(data["debateCompleted"], true);
            let report = &data["report"];
            assert_eq!(report["winner"], "user");
            assert_eq!(report["strengths"], "Clear thesis\nGood pacing");
            for key in ["argumentStrength", "evidenceQuality", "rebuttalEffectiveness", "clarity"] {
                let score = report[key].as_i64().unwrap();
                assert!((1..=10).contains(&score), "{key} = {score}");
            }
            assert_eq!(report["argumentStrength"], 10);
            assert_eq!(report["rebuttalEffectiveness"], 1);
        }
    }

    let id = room_id.as_i64().unwrap();
    let room = DebateRoomRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(room.status, "completed");
    assert!(room.completed_at.is_some());
    assert_eq!(DebateMessageRepo::count_by_room(&pool, id).await.unwrap(), 15);
    assert_eq!(DebateReportRepo::count_by_room(&pool, id).await.unwrap(), 1);

    // The completed room refuses further turns and keeps its single report.
    let (status, json) = post_expect(
        app.clone(),
        &turns_uri(&room_id),
        json!({ "content": "One more thing" }),
        &token_for(USER),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_STATE");
    assert_eq!(DebateReportRepo::count_by_room(&pool, id).await.unwrap(), 1);

    let response = get_auth(app, &format!("/api/v1/debates/{id}/report"), &token_for(USER)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["roomId"], id);
}

// ---------------------------------------------------------------------------
// Fallbacks
// ---------------------------------------------------------------------------

/// A failing provider never fails the session: fixed opening, fixed rebuttal,
/// fallback report with a tie verdict.
#[sqlx::test(migrations = "../../db/migrations")]
async fn provider_failure_uses_fixed_fallbacks(pool: PgPool) {
    let app = common::build_test_app_with_llm(pool, Arc::new(MockProvider::failing()));

    let created = create_room(app.clone(), create_body(Some(1))).await;
    assert_eq!(created["openingMessage"]["content"], FALLBACK_OPENING);

    let (status, json) = post_expect(
        app,
        &turns_uri(&created["room"]["id"]),
        json!({ "content": "Cars pollute." }),
        &token_for(USER),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = &json["data"];
    assert_eq!(data["aiResponse"]["content"], FALLBACK_REBUTTAL);
    assert_eq!(data["debateCompleted"], true);
    assert_eq!(data["report"]["winner"], "tie");
}

/// Answers rebuttals at once but takes `delay` to judge a debate.
#[derive(Debug)]
struct StallingJudge {
    delay: Duration,
}

#[async_trait]
impl CompletionProvider for StallingJudge {
    fn name(&self) -> &str {
        "stalling-judge"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        if request.max_tokens > DEFAULT_MAX_TOKENS {
            tokio::time::sleep(self.delay).await;
            return Ok(JUDGED_REPORT.to_string());
        }
        Ok("Counterpoint.".to_string())
    }
}

/// A final turn cut off by the request timeout leaves the room without a
/// report. Once the abandoned claim is older than the timeout, the next
/// message completes the room with the fallback report.
#[sqlx::test(migrations = "../../db/migrations")]
async fn final_turn_cut_off_by_timeout_is_completed_by_next_action(pool: PgPool) {
    let mut config = common::test_config();
    config.request_timeout_secs = 1;
    let judge = Arc::new(StallingJudge {
        delay: Duration::from_secs(3),
    });
    let app = common::build_test_app_with_config(pool.clone(), judge, config);

    let created = create_room(app.clone(), create_body(Some(1))).await;
    let room_id = created["room"]["id"].clone();
    let id = room_id.as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &turns_uri(&room_id),
        json!({ "content": "Cars pollute." }),
        &token_for(USER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

    let room = DebateRoomRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(room.status, "active");
    assert_eq!(room.conversation_turn, room.max_turns);
    assert_eq!(DebateReportRepo::count_by_room(&pool, id).await.unwrap(), 0);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (status, json) = post_expect(
        app.clone(),
        &turns_uri(&room_id),
        json!({ "content": "Still here." }),
        &token_for(USER),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["debateCompleted"], true);
    assert_eq!(json["data"]["remainingTurns"], 0);
    assert_eq!(json["data"]["report"]["winner"], "tie");

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/debates/{room_id}/report"),
        &token_for(USER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(DebateReportRepo::count_by_room(&pool, id).await.unwrap(), 1);

    // The recovery message itself is not stored.
    let messages = DebateMessageRepo::list_by_room(&pool, id).await.unwrap();
    assert!(messages.iter().all(|m| m.content != "Still here."));

    let (status, json) = post_expect(
        app,
        &turns_uri(&room_id),
        json!({ "content": "Again." }),
        &token_for(USER),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_STATE");
}

/// The rebuttal prompt carries the whole conversation, newest message last.
#[sqlx::test(migrations = "../../db/migrations")]
async fn rebuttal_prompt_includes_history(pool: PgPool) {
    let mock = Arc::new(MockProvider::constant("Counterpoint."));
    let app = common::build_test_app_with_llm(pool, mock.clone());

    let created = create_room(app.clone(), create_body(None)).await;
    for text in ["First claim", "Second claim"] {
        let (status, _) = post_expect(
            app.clone(),
            &turns_uri(&created["room"]["id"]),
            json!({ "content": text }),
            &token_for(USER),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let requests = mock.requests();
    let last = requests.last().unwrap();
    assert!(last.prompt.contains("USER: First claim"));
    assert!(last.prompt.ends_with("USER: Second claim\n\nWrite your rebuttal."));
    assert!(last.prompt.contains("No, it hurts local businesses"));
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Over-long messages are rejected before anything is stored or claimed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn overlong_message_is_rejected_before_persistence(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = create_room(app.clone(), create_body(None)).await;
    let id = created["room"]["id"].as_i64().unwrap();

    let (status, json) = post_expect(
        app.clone(),
        &turns_uri(&created["room"]["id"]),
        json!({ "content": "a".repeat(501) }),
        &token_for(USER),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let room = DebateRoomRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(room.conversation_turn, 0);
    assert_eq!(DebateMessageRepo::count_by_room(&pool, id).await.unwrap(), 1);

    // Length is counted in characters, not bytes.
    let (status, _) = post_expect(
        app.clone(),
        &turns_uri(&created["room"]["id"]),
        json!({ "content": "é".repeat(500) }),
        &token_for(USER),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = post_expect(
        app,
        &turns_uri(&created["room"]["id"]),
        json!({ "content": "   " }),
        &token_for(USER),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn creation_requires_topic_and_positions(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = create_body(None);
    body["aiPosition"] = json!("  ");
    let (status, json) = post_expect(app.clone(), "/api/v1/debates", body, &token_for(USER)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let (status, _) =
        post_expect(app.clone(), "/api/v1/debates", create_body(Some(0)), &token_for(USER)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = post_expect(
        app,
        "/api/v1/debates",
        json!({ "debateType": "monologue", "topic": "x" }),
        &token_for(USER),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

/// Actions from another mode, or more than one action field, are malformed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_or_ambiguous_actions_are_bad_requests(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_room(app.clone(), create_body(None)).await;
    let uri = turns_uri(&created["room"]["id"]);

    for body in [
        json!({ "action": "show_next" }),
        json!({ "selectedOptionId": 1 }),
        json!({ "content": "hi", "action": "show_next" }),
        json!({}),
    ] {
        let (status, json) = post_expect(app.clone(), &uri, body.clone(), &token_for(USER)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}
