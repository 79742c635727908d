// ABOUTME: Append-only attempt recording and audit-logged undo
// ABOUTME: Transactional insert of result, segment, and turn rows with PR detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::debug;

use streamline_analytics::records::{calc_sob, detect_segment_prs, detect_total_pr, SumOfBest, TotalPr};
use streamline_core::errors::{AppError, AppResult};
use streamline_core::models::{Stroke, TurnPhases};

use super::audit::{insert_audit_entry_tx, AuditAction, RESULT_ENTITY};
use super::Database;

/// A new attempt ready to be recorded
///
/// All times are canonical seconds; parsing and tolerance validation happen at
/// the input boundary before this struct is built (`streamline_core::time`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttempt {
    /// Athlete the attempt belongs to
    pub athlete_id: i64,
    /// Display name snapshot; may be empty, the leaderboard falls back to the ID
    pub athlete_name: String,
    /// Stroke swum
    pub stroke: Stroke,
    /// Declared distance in meters
    pub distance: u32,
    /// Total time for the swim
    pub total_seconds: f64,
    /// Split per segment in swim order; may be empty when only a total was timed
    pub splits: Vec<f64>,
    /// Measured turns in swim order; turn numbers are assigned from position
    pub turns: Vec<TurnPhases>,
    /// When the swim happened
    pub timestamp: DateTime<Utc>,
    /// User recording the attempt, for the audit trail
    pub recorded_by: i64,
}

/// What a freshly recorded attempt achieved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptOutcome {
    /// Row ID of the stored result
    pub result_id: i64,
    /// Total-time record outcome against the prior best
    pub total: TotalPr,
    /// Per-segment improvement flags, one per recorded split
    pub segments_improved: Vec<bool>,
    /// Sum of Best before and after this attempt
    pub sob: SumOfBest,
}

/// A stored attempt with its splits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptDetail {
    /// Result row ID
    pub id: i64,
    /// Athlete the attempt belongs to
    pub athlete_id: i64,
    /// Display name snapshot taken at recording time
    pub athlete_name: String,
    /// Stroke swum
    pub stroke: Stroke,
    /// Declared distance in meters
    pub distance: u32,
    /// Total time for the swim
    pub total_seconds: f64,
    /// When the swim happened
    pub timestamp: DateTime<Utc>,
    /// Whether this attempt set a total-time PR when recorded
    pub is_pr: bool,
    /// Splits in segment order; empty when none were recorded
    pub splits: Vec<f64>,
}

impl Database {
    /// Record a new attempt
    ///
    /// Consults the prior best before inserting so the stored `is_pr` flag and
    /// the returned outcome agree, then writes the result row, its segments,
    /// its turns, and an audit entry in one transaction. Attempts are
    /// append-only; nothing here ever updates an existing row.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for a non-positive distance, an
    /// invalid-time error for negative times, and a database error when any
    /// statement fails.
    pub async fn record_attempt(&self, attempt: &NewAttempt) -> AppResult<AttemptOutcome> {
        if attempt.distance == 0 {
            return Err(AppError::invalid_input("distance must be positive"));
        }
        if attempt.total_seconds < 0.0 {
            return Err(AppError::invalid_time(format!(
                "negative total {}",
                attempt.total_seconds
            )));
        }
        if let Some(split) = attempt.splits.iter().find(|split| **split < 0.0) {
            return Err(AppError::invalid_time(format!("negative split {split}")));
        }

        let prior_best = self
            .total_best(attempt.athlete_id, attempt.stroke, attempt.distance, None)
            .await?;
        let prior_segment_bests = self
            .segment_bests(attempt.athlete_id, attempt.stroke, attempt.distance, None)
            .await?;

        let total = detect_total_pr(prior_best.map(|best| best.total_seconds), attempt.total_seconds)?;
        let segments_improved = detect_segment_prs(&prior_segment_bests, &attempt.splits)?;
        let new_segments: Vec<Option<f64>> = attempt.splits.iter().copied().map(Some).collect();
        let sob = calc_sob(&prior_segment_bests, &new_segments)?;

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let inserted = sqlx::query(
            r"
            INSERT INTO results (
                athlete_id, athlete_name, stroke, distance,
                total_seconds, timestamp, is_pr
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(attempt.athlete_id)
        .bind(&attempt.athlete_name)
        .bind(attempt.stroke.as_str())
        .bind(i64::from(attempt.distance))
        .bind(attempt.total_seconds)
        .bind(attempt.timestamp)
        .bind(total.is_new)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert result: {e}")))?;
        let result_id = inserted.last_insert_rowid();

        for (index, split) in attempt.splits.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO result_segments (result_id, segment_index, split_seconds)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(result_id)
            .bind(index as i64)
            .bind(*split)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert segment: {e}")))?;
        }

        for (index, phases) in attempt.turns.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO turn_analysis (
                    result_id, turn_number, approach_time, wall_contact_time,
                    push_off_time, underwater_time, total_turn_time
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(result_id)
            .bind(index as i64 + 1)
            .bind(phases.approach)
            .bind(phases.wall_contact)
            .bind(phases.push_off)
            .bind(phases.underwater)
            .bind(phases.total())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert turn: {e}")))?;
        }

        let after_state = attempt_snapshot(attempt, result_id, total.is_new);
        insert_audit_entry_tx(
            &mut tx,
            attempt.recorded_by,
            AuditAction::Create,
            RESULT_ENTITY,
            result_id,
            None,
            Some(after_state),
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit attempt: {e}")))?;

        debug!(
            athlete_id = attempt.athlete_id,
            result_id,
            is_pr = total.is_new,
            "recorded attempt"
        );

        Ok(AttemptOutcome {
            result_id,
            total,
            segments_improved,
            sob,
        })
    }

    /// Most recent attempt for an athlete, stroke, and distance
    ///
    /// Recency ties on the timestamp break toward the higher row ID, i.e. the
    /// later insert.
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn latest_attempt(
        &self,
        athlete_id: i64,
        stroke: Stroke,
        distance: u32,
    ) -> AppResult<Option<AttemptDetail>> {
        let row = sqlx::query(
            r"
            SELECT id, athlete_id, athlete_name, stroke, distance,
                   total_seconds, timestamp, is_pr
            FROM results
            WHERE athlete_id = $1 AND stroke = $2 AND distance = $3
            ORDER BY timestamp DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(athlete_id)
        .bind(stroke.as_str())
        .bind(i64::from(distance))
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch latest attempt: {e}")))?;

        match row {
            Some(row) => Ok(Some(self.attempt_detail_from_row(&row).await?)),
            None => Ok(None),
        }
    }

    /// Fetch one attempt by its row ID
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn attempt_by_id(&self, result_id: i64) -> AppResult<Option<AttemptDetail>> {
        let row = sqlx::query(
            r"
            SELECT id, athlete_id, athlete_name, stroke, distance,
                   total_seconds, timestamp, is_pr
            FROM results
            WHERE id = $1
            ",
        )
        .bind(result_id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch attempt: {e}")))?;

        match row {
            Some(row) => Ok(Some(self.attempt_detail_from_row(&row).await?)),
            None => Ok(None),
        }
    }

    /// Delete an attempt through the audit path
    ///
    /// The only sanctioned way to remove a result: the full before-state
    /// (row, splits, turns) is written to the audit log in the same
    /// transaction as the deletes. Returns `false` when the row does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns a database error when any statement fails.
    pub async fn undo_attempt(&self, result_id: i64, acting_user_id: i64) -> AppResult<bool> {
        let Some(detail) = self.attempt_by_id(result_id).await? else {
            return Ok(false);
        };
        let turns = self.turns_for_result(result_id).await?;
        let before_state = serde_json::to_value(DeletedAttempt {
            attempt: detail,
            turns,
        })
        .map_err(|e| AppError::serialization(format!("Failed to snapshot attempt: {e}")))?;

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        insert_audit_entry_tx(
            &mut tx,
            acting_user_id,
            AuditAction::Delete,
            RESULT_ENTITY,
            result_id,
            Some(before_state),
            None,
        )
        .await?;

        for statement in [
            "DELETE FROM turn_analysis WHERE result_id = $1",
            "DELETE FROM result_segments WHERE result_id = $1",
            "DELETE FROM results WHERE id = $1",
        ] {
            sqlx::query(statement)
                .bind(result_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to delete attempt: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit undo: {e}")))?;

        debug!(result_id, acting_user_id, "attempt deleted via audit path");
        Ok(true)
    }

    /// Splits for one result, in segment order
    pub(super) async fn splits_for_result(&self, result_id: i64) -> AppResult<Vec<f64>> {
        let rows = sqlx::query(
            r"
            SELECT split_seconds FROM result_segments
            WHERE result_id = $1
            ORDER BY segment_index ASC
            ",
        )
        .bind(result_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch segments: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| row.get::<f64, _>("split_seconds"))
            .collect())
    }

    /// Turn phases for one result, in turn order
    pub(super) async fn turns_for_result(&self, result_id: i64) -> AppResult<Vec<TurnPhases>> {
        let rows = sqlx::query(
            r"
            SELECT approach_time, wall_contact_time, push_off_time, underwater_time
            FROM turn_analysis
            WHERE result_id = $1
            ORDER BY turn_number ASC
            ",
        )
        .bind(result_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch turns: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| TurnPhases {
                approach: row.get("approach_time"),
                wall_contact: row.get("wall_contact_time"),
                push_off: row.get("push_off_time"),
                underwater: row.get("underwater_time"),
            })
            .collect())
    }

    /// Decode a results row and attach its splits
    async fn attempt_detail_from_row(&self, row: &sqlx::sqlite::SqliteRow) -> AppResult<AttemptDetail> {
        let id: i64 = row.get("id");
        let stroke_name: String = row.get("stroke");
        let stroke = Stroke::parse_alias(&stroke_name)?;
        let distance: i64 = row.get("distance");
        let distance = u32::try_from(distance).map_err(|_| {
            AppError::database(format!("invalid distance {distance} in result {id}"))
        })?;
        let splits = self.splits_for_result(id).await?;

        Ok(AttemptDetail {
            id,
            athlete_id: row.get("athlete_id"),
            athlete_name: row.get("athlete_name"),
            stroke,
            distance,
            total_seconds: row.get("total_seconds"),
            timestamp: row.get("timestamp"),
            is_pr: row.get("is_pr"),
            splits,
        })
    }
}

/// Snapshot stored in the audit log when an attempt is deleted
#[derive(Debug, Serialize, Deserialize)]
struct DeletedAttempt {
    attempt: AttemptDetail,
    turns: Vec<TurnPhases>,
}

/// Audit snapshot written when an attempt is recorded
fn attempt_snapshot(attempt: &NewAttempt, result_id: i64, is_pr: bool) -> serde_json::Value {
    serde_json::json!({
        "result_id": result_id,
        "athlete_id": attempt.athlete_id,
        "athlete_name": attempt.athlete_name,
        "stroke": attempt.stroke.as_str(),
        "distance": attempt.distance,
        "total_seconds": attempt.total_seconds,
        "splits": attempt.splits,
        "turn_count": attempt.turns.len(),
        "timestamp": attempt.timestamp.to_rfc3339(),
        "is_pr": is_pr,
    })
}
