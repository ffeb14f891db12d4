//! Turn dispatch: one client action against one room.
//!
//! Every action goes through the same gate before a mode handler runs:
//!
//! 1. the room must exist and belong to the caller (otherwise 404),
//! 2. it must still be active (otherwise `INVALID_STATE`),
//! 3. the action must match the room's mode (otherwise 400).
//!
//! Mode handlers then call [`claim_turn`], which advances the counter with a
//! conditional update. Two concurrent requests for the same turn cannot both
//! win; the loser gets a 409 `CONFLICT`.
//!
//! A room can be left active with every turn claimed when the request that
//! claimed the last turn is dropped before it stores the report. Once that
//! claim is older than the request timeout, the next action completes the
//! room instead of being rejected.

use chrono::Utc;
use rostrum_core::debate::ActionKind;
use rostrum_core::error::CoreError;
use rostrum_core::types::DbId;
use rostrum_db::models::debate_room::DebateRoom;
use rostrum_db::repositories::DebateRoomRepo;
use rostrum_db::DbPool;

use crate::engine::report::recover_exhausted_room;
use crate::engine::views::{RecoveredTurn, TurnOutcome};
use crate::engine::{free_text, playback, tree_walk};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Run `action` against room `room_id` on behalf of `user_id`.
pub async fn dispatch_turn(
    state: &AppState,
    user_id: DbId,
    room_id: DbId,
    action: ActionKind,
) -> AppResult<TurnOutcome> {
    let room = load_owned_room(&state.pool, room_id, user_id).await?;

    if !room.is_active() {
        return Err(CoreError::InvalidState(format!(
            "Debate room {room_id} is already completed"
        ))
        .into());
    }

    let room_type = room.debate_type()?;
    if action.debate_type() != room_type {
        return Err(AppError::BadRequest(format!(
            "{} is not accepted by a {} debate",
            describe(&action),
            room_type.as_str()
        )));
    }

    if room.conversation_turn >= room.max_turns {
        return recover_final_turn(state, room).await;
    }

    tracing::debug!(
        room_id,
        user_id,
        debate_type = room_type.as_str(),
        turn = room.conversation_turn,
        "Dispatching debate action"
    );

    match action {
        ActionKind::FreeText(text) => free_text::take_turn(state, room, &text)
            .await
            .map(TurnOutcome::FreeText),
        ActionKind::RevealNext => playback::reveal_next(state, room)
            .await
            .map(TurnOutcome::Playback),
        ActionKind::SelectOption(option_id) => tree_walk::select_option(state, room, option_id)
            .await
            .map(TurnOutcome::TreeWalk),
    }
}

/// Load a room owned by `user_id`. Rooms of other users are reported as
/// missing so their ids do not leak.
pub async fn load_owned_room(pool: &DbPool, room_id: DbId, user_id: DbId) -> AppResult<DebateRoom> {
    DebateRoomRepo::find_owned(pool, room_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DebateRoom",
            id: room_id,
        }))
}

/// Advance the room's counter by one, returning the updated row.
///
/// The returned `conversation_turn` is the turn this request owns.
pub async fn claim_turn(pool: &DbPool, room: &DebateRoom) -> AppResult<DebateRoom> {
    claim(pool, room, None).await
}

/// [`claim_turn`] for an MCQ room that moves on to `node_id` with this turn.
pub async fn claim_turn_and_move(
    pool: &DbPool,
    room: &DebateRoom,
    node_id: DbId,
) -> AppResult<DebateRoom> {
    claim(pool, room, Some(node_id)).await
}

async fn claim(pool: &DbPool, room: &DebateRoom, next_node: Option<DbId>) -> AppResult<DebateRoom> {
    if room.conversation_turn >= room.max_turns {
        return Err(CoreError::InvalidState(format!(
            "Debate room {} has used all {} turns",
            room.id, room.max_turns
        ))
        .into());
    }

    match DebateRoomRepo::claim_turn(pool, room.id, room.conversation_turn, next_node).await? {
        Some(claimed) => {
            tracing::info!(
                room_id = claimed.id,
                turn = claimed.conversation_turn,
                max_turns = claimed.max_turns,
                node_id = ?next_node,
                "Turn claimed"
            );
            Ok(claimed)
        }
        None => {
            tracing::warn!(
                room_id = room.id,
                expected_turn = room.conversation_turn,
                "Turn already taken by a concurrent request"
            );
            Err(CoreError::Conflict(format!(
                "Turn {} of debate room {} was already submitted",
                room.conversation_turn + 1,
                room.id
            ))
            .into())
        }
    }
}

/// Finish a room whose last turn is claimed but whose report is missing.
///
/// While the claiming request may still be running (its claim is younger
/// than the request timeout) this is a concurrent submit and gets 409.
async fn recover_final_turn(state: &AppState, room: DebateRoom) -> AppResult<TurnOutcome> {
    let claim_age = Utc::now() - room.updated_at;
    if claim_age.num_seconds() < state.config.request_timeout_secs as i64 {
        return Err(CoreError::Conflict(format!(
            "Final turn of debate room {} is still being processed",
            room.id
        ))
        .into());
    }

    let report = recover_exhausted_room(state, &room).await?;
    Ok(TurnOutcome::Recovered(RecoveredTurn::new(&room, report)))
}

fn describe(action: &ActionKind) -> &'static str {
    match action {
        ActionKind::FreeText(_) => "A free-text message",
        ActionKind::RevealNext => "'show_next'",
        ActionKind::SelectOption(_) => "An option selection",
    }
}

