//! Room creation for the three debate modes.
//!
//! - `user_vs_ai`: topic and both positions come from the client; the AI
//!   opens with a statement stored as turn 0.
//! - `ai_vs_ai`: the latest topic of the news group is resolved and its
//!   scripted conversation returned in full; `max_turns` is its round count.
//! - `mcq`: the AI takes the tree opposite the user's stance; the room starts
//!   at that tree's root.

use rostrum_core::debate::{
    validate_max_conversations, validate_required_text, DebateType, Sender, Stance, TreeType,
    MCQ_MAX_TURNS,
};
use rostrum_core::error::CoreError;
use rostrum_core::playback::{distinct_rounds, sort_script};
use rostrum_core::prompts::DebateFrame;
use rostrum_core::types::DbId;
use rostrum_db::models::debate_message::CreateDebateMessage;
use rostrum_db::models::debate_room::CreateDebateRoom;
use rostrum_db::models::debate_topic::DebateTopic;
use rostrum_db::repositories::{
    DebateMessageRepo, DebateRoomRepo, DebateScriptRepo, DebateTopicRepo, McqRepo,
};
use rostrum_db::DbPool;
use serde::Deserialize;

use crate::engine::free_text::opening_statement;
use crate::engine::views::{CreatedDebate, McqNodeView};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of `POST /debates`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDebateRequest {
    pub debate_type: String,
    pub topic: Option<String>,
    pub user_position: Option<String>,
    pub ai_position: Option<String>,
    #[serde(alias = "newsId")]
    pub group_id: Option<DbId>,
    pub selected_user_stance: Option<String>,
    pub max_conversations: Option<i32>,
}

/// Create a room for `user_id` as described by `req`.
pub async fn create_debate(
    state: &AppState,
    user_id: DbId,
    req: &CreateDebateRequest,
) -> AppResult<CreatedDebate> {
    let debate_type = DebateType::from_str_value(&req.debate_type).map_err(AppError::BadRequest)?;

    let created = match debate_type {
        DebateType::UserVsAi => create_free_text(state, user_id, req).await?,
        DebateType::AiVsAi => create_playback(&state.pool, user_id, req).await?,
        DebateType::Mcq => create_tree_walk(&state.pool, user_id, req).await?,
    };

    tracing::info!(
        room_id = created.room.id,
        user_id,
        debate_type = debate_type.as_str(),
        max_turns = created.room.max_turns,
        "Debate room created"
    );
    Ok(created)
}

async fn create_free_text(
    state: &AppState,
    user_id: DbId,
    req: &CreateDebateRequest,
) -> AppResult<CreatedDebate> {
    let topic = validate_required_text("topic", req.topic.as_deref())?;
    let user_position = validate_required_text("userPosition", req.user_position.as_deref())?;
    let ai_position = validate_required_text("aiPosition", req.ai_position.as_deref())?;
    let max_turns = match req.max_conversations {
        Some(n) => validate_max_conversations(n)?,
        None => state.config.default_max_conversations,
    };

    let room = DebateRoomRepo::create(
        &state.pool,
        &CreateDebateRoom {
            user_id,
            topic: topic.to_string(),
            topic_id: None,
            debate_type: DebateType::UserVsAi,
            user_position: Some(user_position.to_string()),
            ai_position: Some(ai_position.to_string()),
            max_turns,
            tree_type: None,
            user_stance: None,
            current_response_id: None,
        },
    )
    .await?;

    let frame = DebateFrame {
        topic,
        user_position,
        ai_position,
    };
    let opening = opening_statement(state, &frame).await;
    let opening_message = DebateMessageRepo::create(
        &state.pool,
        &CreateDebateMessage {
            room_id: room.id,
            sender: Sender::Ai,
            turn_number: 0,
            content: &opening,
        },
    )
    .await?;

    Ok(CreatedDebate {
        opening_message: Some(opening_message),
        ..CreatedDebate::new(room)
    })
}

async fn create_playback(
    pool: &DbPool,
    user_id: DbId,
    req: &CreateDebateRequest,
) -> AppResult<CreatedDebate> {
    let topic = latest_topic(pool, req.group_id, DebateType::AiVsAi).await?;

    let mut script = DebateScriptRepo::list_by_topic(pool, topic.id).await?;
    if script.is_empty() {
        return Err(CoreError::NotFound {
            entity: "DebateScript for topic",
            id: topic.id,
        }
        .into());
    }
    sort_script(&mut script);
    let rounds = i32::try_from(distinct_rounds(&script).len())
        .map_err(|_| AppError::InternalError(format!("Script for topic {} is too long", topic.id)))?;

    let room = DebateRoomRepo::create(
        pool,
        &CreateDebateRoom {
            user_id,
            topic: topic.title.clone(),
            topic_id: Some(topic.id),
            debate_type: DebateType::AiVsAi,
            user_position: None,
            ai_position: None,
            max_turns: rounds,
            tree_type: None,
            user_stance: None,
            current_response_id: None,
        },
    )
    .await?;

    Ok(CreatedDebate {
        script: Some(script),
        ..CreatedDebate::new(room)
    })
}

async fn create_tree_walk(
    pool: &DbPool,
    user_id: DbId,
    req: &CreateDebateRequest,
) -> AppResult<CreatedDebate> {
    let raw_stance = req.selected_user_stance.as_deref().ok_or_else(|| {
        CoreError::Validation("selectedUserStance is required for mcq debates".to_string())
    })?;
    let stance = Stance::from_str_value(raw_stance).map_err(CoreError::Validation)?;
    let topic = latest_topic(pool, req.group_id, DebateType::Mcq).await?;

    let tree_type = TreeType::opposing(stance);
    let root = McqRepo::find_root(pool, topic.id, tree_type)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "McqResponse root for topic",
            id: topic.id,
        })?;
    let options = McqRepo::list_options(pool, root.id).await?;
    if options.is_empty() {
        tracing::warn!(topic_id = topic.id, root_id = root.id, "MCQ root has no options");
        return Err(CoreError::NotFound {
            entity: "McqOption for root response",
            id: root.id,
        }
        .into());
    }

    let room = DebateRoomRepo::create(
        pool,
        &CreateDebateRoom {
            user_id,
            topic: topic.title.clone(),
            topic_id: Some(topic.id),
            debate_type: DebateType::Mcq,
            user_position: None,
            ai_position: None,
            max_turns: MCQ_MAX_TURNS,
            tree_type: Some(tree_type),
            user_stance: Some(stance),
            current_response_id: Some(root.id),
        },
    )
    .await?;

    tracing::debug!(
        room_id = room.id,
        stance = stance.as_str(),
        tree_type = tree_type.as_str(),
        root_id = root.id,
        "MCQ walk started"
    );

    Ok(CreatedDebate {
        tree_type: Some(tree_type),
        first_question: Some(McqNodeView::new(root, options)),
        ..CreatedDebate::new(room)
    })
}

/// The most recent topic of a news group; `group_id` is required for the
/// pre-authored modes.
async fn latest_topic(
    pool: &DbPool,
    group_id: Option<DbId>,
    debate_type: DebateType,
) -> AppResult<DebateTopic> {
    let group_id = group_id.ok_or_else(|| {
        CoreError::Validation(format!(
            "groupId is required for {} debates",
            debate_type.as_str()
        ))
    })?;
    let topic = DebateTopicRepo::find_latest_by_group(pool, group_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "DebateTopic for group",
            id: group_id,
        })?;
    Ok(topic)
}
