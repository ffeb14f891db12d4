//! Report generation and the completion write.
//!
//! Free-text rooms ask the completion provider for a judged report and fall
//! back to a fixed one on any failure. Playback and MCQ rooms use templates.
//! Whatever the source, [`finish_room`] stores it together with the room's
//! status flip, once.

use std::time::Duration;

use rostrum_core::debate::{DebateType, Sender};
use rostrum_core::prompts::{report_prompt, TranscriptLine};
use rostrum_core::report::{
    fallback_report, parse_report_response, playback_report, tree_walk_report, ReportContent,
};
use rostrum_core::types::DbId;
use rostrum_db::models::debate_report::DebateReport;
use rostrum_db::models::debate_room::DebateRoom;
use rostrum_db::repositories::{DebateMessageRepo, DebateReportRepo};
use rostrum_llm::CompletionRequest;

use crate::engine::free_text::frame;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Reports are longer than rebuttals and should be deterministic-ish.
const REPORT_MAX_TOKENS: u32 = 800;
const REPORT_TEMPERATURE: f32 = 0.3;

/// Judge a finished free-text debate. Never fails: provider and parse errors
/// yield [`fallback_report`].
pub async fn judge_free_text(state: &AppState, room: &DebateRoom) -> AppResult<ReportContent> {
    let messages = DebateMessageRepo::list_by_room(&state.pool, room.id).await?;
    let transcript: Vec<TranscriptLine<'_>> = messages
        .iter()
        .map(|m| TranscriptLine {
            sender: m.sender(),
            content: &m.content,
        })
        .collect();

    let request = CompletionRequest::from_pair(report_prompt(&frame(room), &transcript))
        .with_max_tokens(REPORT_MAX_TOKENS)
        .with_temperature(REPORT_TEMPERATURE);

    let user_lines = transcript.iter().filter(|l| l.sender == Sender::User).count();

    let content = match state.llm.complete(request).await {
        Ok(reply) => match parse_report_response(&reply) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(room_id = room.id, error = %e, "Unparseable report reply, using fallback");
                fallback_report()
            }
        },
        Err(e) => {
            tracing::warn!(room_id = room.id, error = %e, "Report generation failed, using fallback");
            fallback_report()
        }
    };

    tracing::debug!(
        room_id = room.id,
        user_lines,
        winner = content.winner.as_str(),
        "Free-text debate judged"
    );
    Ok(content)
}

/// Store `content` as the room's report and mark the room completed.
///
/// If another request completed the room first, its report is returned
/// instead and `content` is discarded.
pub async fn finish_room(
    state: &AppState,
    room_id: DbId,
    content: &ReportContent,
) -> AppResult<DebateReport> {
    if let Some(report) = DebateReportRepo::complete_room(&state.pool, room_id, content).await? {
        tracing::info!(
            room_id,
            report_id = report.id,
            winner = %report.winner,
            "Debate completed"
        );
        return Ok(report);
    }

    tracing::warn!(room_id, "Room already had a report, keeping the first one");
    DebateReportRepo::find_by_room(&state.pool, room_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Report for room {room_id} vanished after conflict"))
        })
}

/// Complete a room whose last turn was claimed by a request that never got
/// to write the report (timed out or disconnected).
///
/// Builds the report the mode would have produced. Free-text judging gets
/// half the request budget; past that the fallback report is stored.
pub async fn recover_exhausted_room(state: &AppState, room: &DebateRoom) -> AppResult<DebateReport> {
    let content = match room.debate_type()? {
        DebateType::UserVsAi => {
            let budget = Duration::from_millis(state.config.request_timeout_secs * 1000 / 2);
            match tokio::time::timeout(budget, judge_free_text(state, room)).await {
                Ok(judged) => judged?,
                Err(_) => {
                    tracing::warn!(
                        room_id = room.id,
                        budget_ms = budget.as_millis() as u64,
                        "Report generation timed out during recovery, using fallback"
                    );
                    fallback_report()
                }
            }
        }
        DebateType::AiVsAi => playback_report(room.conversation_turn),
        DebateType::Mcq => tree_walk_report(room.conversation_turn, room.user_stance()?),
    };

    tracing::warn!(
        room_id = room.id,
        turn = room.conversation_turn,
        max_turns = room.max_turns,
        "Recovering debate room left without a report"
    );
    finish_room(state, room.id, &content).await
}
