//! User-vs-AI free-text debates.
//!
//! Each turn stores the user's message, asks the completion provider for a
//! rebuttal over the full history, and stores that as the AI message of the
//! same turn. Provider failures never fail the turn; a fixed sentence is
//! used instead.

use rostrum_core::debate::{remaining_turns, validate_message, Sender};
use rostrum_core::prompts::{
    opening_prompt, rebuttal_prompt, DebateFrame, TranscriptLine, FALLBACK_OPENING,
    FALLBACK_REBUTTAL,
};
use rostrum_db::models::debate_message::{CreateDebateMessage, DebateMessage};
use rostrum_db::models::debate_room::DebateRoom;
use rostrum_db::repositories::DebateMessageRepo;
use rostrum_llm::CompletionRequest;

use crate::engine::dispatcher::claim_turn;
use crate::engine::report::{finish_room, judge_free_text};
use crate::engine::views::FreeTextTurn;
use crate::error::AppResult;
use crate::state::AppState;

/// Handle one free-text message.
pub async fn take_turn(state: &AppState, room: DebateRoom, content: &str) -> AppResult<FreeTextTurn> {
    // Nothing is persisted for a message that fails validation.
    let text = validate_message(content)?;

    let room = claim_turn(&state.pool, &room).await?;
    let turn = room.conversation_turn;

    let user_message = DebateMessageRepo::create(
        &state.pool,
        &CreateDebateMessage {
            room_id: room.id,
            sender: Sender::User,
            turn_number: turn,
            content: text,
        },
    )
    .await?;

    let history = DebateMessageRepo::list_by_room(&state.pool, room.id).await?;
    let reply = rebuttal(state, &room, &history).await;

    let ai_response = DebateMessageRepo::create(
        &state.pool,
        &CreateDebateMessage {
            room_id: room.id,
            sender: Sender::Ai,
            turn_number: turn,
            content: &reply,
        },
    )
    .await?;

    let debate_completed = turn >= room.max_turns;
    let report = if debate_completed {
        let content = judge_free_text(state, &room).await?;
        Some(finish_room(state, room.id, &content).await?)
    } else {
        None
    };

    Ok(FreeTextTurn {
        user_message,
        ai_response,
        debate_completed,
        report,
        conversation_turn: turn,
        remaining_turns: remaining_turns(turn, room.max_turns),
    })
}

/// Topic and positions of a free-text room.
pub fn frame(room: &DebateRoom) -> DebateFrame<'_> {
    DebateFrame {
        topic: &room.topic,
        user_position: room.user_position.as_deref().unwrap_or_default(),
        ai_position: room.ai_position.as_deref().unwrap_or_default(),
    }
}

/// The AI's opening statement for a new room.
pub async fn opening_statement(state: &AppState, frame: &DebateFrame<'_>) -> String {
    let request = CompletionRequest::from_pair(opening_prompt(frame));
    complete_or(state, request, FALLBACK_OPENING).await
}

async fn rebuttal(state: &AppState, room: &DebateRoom, history: &[DebateMessage]) -> String {
    let lines: Vec<TranscriptLine<'_>> = history
        .iter()
        .map(|m| TranscriptLine {
            sender: m.sender(),
            content: &m.content,
        })
        .collect();
    let request = CompletionRequest::from_pair(rebuttal_prompt(&frame(room), &lines));
    complete_or(state, request, FALLBACK_REBUTTAL).await
}

/// Run `request`, substituting `fallback` for errors and blank replies.
async fn complete_or(state: &AppState, request: CompletionRequest, fallback: &str) -> String {
    match state.llm.complete(request).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            tracing::warn!(provider = state.llm.name(), "Blank completion, using fallback");
            fallback.to_string()
        }
        Err(e) => {
            tracing::warn!(provider = state.llm.name(), error = %e, "Completion failed, using fallback");
            fallback.to_string()
        }
    }
}
