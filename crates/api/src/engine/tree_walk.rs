//! MCQ tree walks.
//!
//! The room points at the node currently shown (`current_response_id`). A
//! selection must be one of that node's options. The walk then either ends
//! outright (terminal option, deepest level, turn cap) or resolves the next
//! node through the three-tier lookup in `rostrum_core::tree_walk`. The turn
//! is claimed last, together with the move to that node.

use rostrum_core::debate::{remaining_turns, Stance, MCQ_MAX_LEVEL};
use rostrum_core::error::CoreError;
use rostrum_core::report::tree_walk_report;
use rostrum_core::tree_walk::{
    end_before_lookup, resolve_next_node, EndReason, NextNode, ResolveTier, TreePosition,
};
use rostrum_core::types::DbId;
use rostrum_db::models::debate_report::DebateReport;
use rostrum_db::models::debate_room::DebateRoom;
use rostrum_db::models::mcq::McqResponse;
use rostrum_db::repositories::{McqRepo, McqTreeLookup};

use crate::engine::dispatcher::{claim_turn, claim_turn_and_move};
use crate::engine::report::finish_room;
use crate::engine::views::{McqNodeView, SelectedChoice, TreeWalkTurn};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Apply the user's choice of `option_id` at the room's current node.
pub async fn select_option(
    state: &AppState,
    room: DebateRoom,
    option_id: DbId,
) -> AppResult<TreeWalkTurn> {
    let pool = &state.pool;
    let topic_id = room.required_topic_id()?;
    let tree_type = room.tree_type()?;
    let stance = room.user_stance()?;

    let current_id = room.current_response_id.ok_or_else(|| {
        AppError::InternalError(format!("MCQ room {} has no current node", room.id))
    })?;
    let current = McqRepo::find_response(pool, current_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "McqResponse",
            id: current_id,
        }))?;

    // A room parked on a leaf lost the request that reached it before the
    // report was stored. There is nothing left to choose; finish the walk.
    if McqRepo::list_options(pool, current.id).await?.is_empty() {
        let report = end_walk(state, &room, stance, EndReason::LeafNode).await?;
        return Ok(TreeWalkTurn {
            next_question: None,
            is_completed: true,
            report: Some(report),
            current_level: current.level,
            remaining_levels: 0,
            selected_choice: None,
            end_reason: Some(EndReason::LeafNode),
            resolved_by: None,
        });
    }

    let option = McqRepo::find_option(pool, option_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "McqOption",
            id: option_id,
        }))?;
    if option.response_id != current.id {
        return Err(AppError::BadRequest(format!(
            "Option {option_id} does not belong to the current question {}",
            current.id
        )));
    }

    // Read-only until the claim; the claim also moves the room.
    let turn = room.conversation_turn + 1;
    let selected_choice = Some(SelectedChoice::from(&option));

    tracing::info!(
        room_id = room.id,
        turn,
        level = current.level,
        option_id,
        letter = %option.option_letter,
        "MCQ option selected"
    );

    if let Some(reason) = end_before_lookup(option.is_terminal, current.level, turn) {
        let room = claim_turn(pool, &room).await?;
        let report = end_walk(state, &room, stance, reason).await?;
        return Ok(TreeWalkTurn {
            next_question: None,
            is_completed: true,
            report: Some(report),
            current_level: current.level,
            remaining_levels: 0,
            selected_choice,
            end_reason: Some(reason),
            resolved_by: None,
        });
    }

    let position = TreePosition {
        topic_id,
        tree_type,
        node_id: current.id,
        level: current.level,
    };
    let lookup = McqTreeLookup::new(pool);
    let (next, tier) = match resolve_next_node(&lookup, &position, option.next_response_id).await? {
        NextNode::Found { node, tier } => (node, tier),
        NextNode::Unresolved => {
            let room = claim_turn(pool, &room).await?;
            let report = end_walk(state, &room, stance, EndReason::Unresolved).await?;
            return Ok(TreeWalkTurn {
                next_question: None,
                is_completed: true,
                report: Some(report),
                current_level: current.level,
                remaining_levels: 0,
                selected_choice,
                end_reason: Some(EndReason::Unresolved),
                resolved_by: None,
            });
        }
    };

    advance_to(state, room, next, tier, selected_choice, stance).await
}

/// Claim the turn moving the room to `next`, and show it. A node without
/// options ends the walk.
async fn advance_to(
    state: &AppState,
    room: DebateRoom,
    next: McqResponse,
    tier: ResolveTier,
    selected_choice: Option<SelectedChoice>,
    stance: Stance,
) -> AppResult<TreeWalkTurn> {
    let options = McqRepo::list_options(&state.pool, next.id).await?;
    let room = claim_turn_and_move(&state.pool, &room, next.id).await?;
    let turn = room.conversation_turn;
    let level = next.level;

    if options.is_empty() {
        tracing::warn!(room_id = room.id, node_id = next.id, level, "MCQ node has no options");
        let report = end_walk(state, &room, stance, EndReason::LeafNode).await?;
        return Ok(TreeWalkTurn {
            next_question: Some(McqNodeView::new(next, options)),
            is_completed: true,
            report: Some(report),
            current_level: level,
            remaining_levels: 0,
            selected_choice,
            end_reason: Some(EndReason::LeafNode),
            resolved_by: Some(tier),
        });
    }

    Ok(TreeWalkTurn {
        next_question: Some(McqNodeView::new(next, options)),
        is_completed: false,
        report: None,
        current_level: level,
        remaining_levels: remaining_levels(level, turn, room.max_turns),
        selected_choice,
        end_reason: None,
        resolved_by: Some(tier),
    })
}

/// Store the walk's report; every claimed turn counts as a choice.
async fn end_walk(
    state: &AppState,
    room: &DebateRoom,
    stance: Stance,
    reason: EndReason,
) -> AppResult<DebateReport> {
    let choices_made = room.conversation_turn;
    tracing::info!(room_id = room.id, choices_made, reason = ?reason, "MCQ walk ended");
    finish_room(state, room.id, &tree_walk_report(choices_made, stance)).await
}

/// The node an active MCQ room is waiting on, with its options.
pub async fn current_question(state: &AppState, room: &DebateRoom) -> AppResult<Option<McqNodeView>> {
    let Some(node_id) = room.current_response_id else {
        return Ok(None);
    };
    let Some(node) = McqRepo::find_response(&state.pool, node_id).await? else {
        return Ok(None);
    };
    let options = McqRepo::list_options(&state.pool, node.id).await?;
    Ok(Some(McqNodeView::new(node, options)))
}

/// Choices still available: bounded by both the tree depth and the turn cap.
fn remaining_levels(level: i32, turn: i32, max_turns: i32) -> i32 {
    (MCQ_MAX_LEVEL - level).min(remaining_turns(turn, max_turns)).max(0)
}
