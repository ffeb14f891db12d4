//! Repository for the `debate_reports` table.
//!
//! Reports are written together with the room's status flip in one
//! transaction. The unique `room_id` constraint plus `ON CONFLICT DO NOTHING`
//! keeps it to one report per room even under concurrent completion.

use rostrum_core::report::ReportContent;
use rostrum_core::types::DbId;
use sqlx::PgPool;

use crate::models::debate_report::DebateReport;

const COLUMNS: &str = "id, room_id, overall_analysis, strengths, improvements, insights, \
                       argument_strength, evidence_quality, rebuttal_effectiveness, clarity, \
                       winner, choices_made, user_stance, rounds_watched, created_at";

pub struct DebateReportRepo;

impl DebateReportRepo {
    /// Mark the room completed and store its report.
    ///
    /// Returns `None` if the room already had a report; the room is left as it
    /// was in that case.
    pub async fn complete_room(
        pool: &PgPool,
        room_id: DbId,
        content: &ReportContent,
    ) -> Result<Option<DebateReport>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO debate_reports
                (room_id, overall_analysis, strengths, improvements, insights,
                 argument_strength, evidence_quality, rebuttal_effectiveness, clarity,
                 winner, choices_made, user_stance, rounds_watched)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             ON CONFLICT ON CONSTRAINT uq_debate_reports_room_id DO NOTHING
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, DebateReport>(&query)
            .bind(room_id)
            .bind(&content.overall_analysis)
            .bind(&content.strengths)
            .bind(&content.improvements)
            .bind(&content.insights)
            .bind(content.scores.argument_strength)
            .bind(content.scores.evidence_quality)
            .bind(content.scores.rebuttal_effectiveness)
            .bind(content.scores.clarity)
            .bind(content.winner.as_str())
            .bind(content.choices_made)
            .bind(content.user_stance.map(|s| s.as_str()))
            .bind(content.rounds_watched)
            .fetch_optional(&mut *tx)
            .await?;

        if report.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query(
            "UPDATE debate_rooms
             SET status = 'completed', completed_at = NOW(), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(room_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(report)
    }

    pub async fn find_by_room(pool: &PgPool, room_id: DbId) -> Result<Option<DebateReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM debate_reports WHERE room_id = $1");
        sqlx::query_as::<_, DebateReport>(&query)
            .bind(room_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_by_room(pool: &PgPool, room_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM debate_reports WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
