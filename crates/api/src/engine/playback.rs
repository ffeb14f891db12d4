//! Scripted AI-vs-AI playback.
//!
//! The conversation is fixed at authoring time. Turn `n` reveals the n-th
//! distinct round; the room's `max_turns` is the round count, fixed when the
//! room was created.

use rostrum_core::debate::remaining_turns;
use rostrum_core::playback::{distinct_rounds, lines_for_round, round_for_turn};
use rostrum_core::report::playback_report;
use rostrum_db::models::debate_room::DebateRoom;
use rostrum_db::repositories::DebateScriptRepo;

use crate::engine::dispatcher::claim_turn;
use crate::engine::report::finish_room;
use crate::engine::views::PlaybackTurn;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Reveal the next round of the room's script.
pub async fn reveal_next(state: &AppState, room: DebateRoom) -> AppResult<PlaybackTurn> {
    let topic_id = room.required_topic_id()?;

    let room = claim_turn(&state.pool, &room).await?;
    let turn = room.conversation_turn;

    let script = DebateScriptRepo::list_by_topic(&state.pool, topic_id).await?;
    let rounds = distinct_rounds(&script);
    let round = round_for_turn(&rounds, turn).ok_or_else(|| {
        AppError::InternalError(format!(
            "Script for topic {topic_id} has {} rounds, room {} expects {}",
            rounds.len(),
            room.id,
            room.max_turns
        ))
    })?;
    let lines = lines_for_round(&script, round);

    tracing::debug!(room_id = room.id, turn, round, lines = lines.len(), "Revealed round");

    let debate_completed = turn >= room.max_turns;
    let report = if debate_completed {
        Some(finish_room(state, room.id, &playback_report(turn)).await?)
    } else {
        None
    };

    Ok(PlaybackTurn {
        round,
        lines,
        debate_completed,
        report,
        conversation_turn: turn,
        remaining_turns: remaining_turns(turn, room.max_turns),
    })
}
