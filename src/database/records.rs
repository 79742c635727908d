// ABOUTME: Personal-record queries over stored results
// ABOUTME: Total and per-segment bests, Sum of Best, and last-vs-best comparison
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::error;

use streamline_analytics::records::{calc_sob, detect_segment_prs, detect_total_pr, SumOfBest, TotalPr};
use streamline_core::errors::{AppError, AppResult};
use streamline_core::models::Stroke;

use super::attempts::AttemptDetail;
use super::Database;

/// Fastest stored total for an athlete, stroke, and distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestTotal {
    /// Result row holding the best total
    pub result_id: i64,
    /// Best total time
    pub total_seconds: f64,
    /// When the best swim happened
    pub timestamp: DateTime<Utc>,
}

/// Segment bests plus their sum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SobSnapshot {
    /// Best split per segment index; `None` where no split was ever recorded
    pub segments: Vec<Option<f64>>,
    /// Sum of the known bests; `None` when no segment was ever recorded
    pub total: Option<f64>,
}

/// One segment of the last attempt against the prior best
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentComparison {
    /// Zero-based segment index
    pub index: usize,
    /// Split from the latest attempt
    pub current: f64,
    /// Best split over earlier attempts, when one exists
    pub previous: Option<f64>,
    /// Whether the latest split beat the prior best
    pub improved: bool,
}

/// The latest attempt measured against everything before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptComparison {
    /// The attempt being assessed
    pub latest: AttemptDetail,
    /// Total-time outcome against the prior best
    pub total: TotalPr,
    /// Per-segment breakdown
    pub segments: Vec<SegmentComparison>,
    /// Sum of Best before and after the latest attempt
    pub sob: SumOfBest,
}

impl Database {
    /// Fastest total on record, optionally excluding one result row
    ///
    /// Ties on the total resolve to the most recent swim, then the later
    /// insert. The exclusion lets callers measure an attempt against the
    /// history that existed before it.
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn total_best(
        &self,
        athlete_id: i64,
        stroke: Stroke,
        distance: u32,
        exclude_result: Option<i64>,
    ) -> AppResult<Option<BestTotal>> {
        let row = sqlx::query(
            r"
            SELECT id, total_seconds, timestamp
            FROM results
            WHERE athlete_id = $1 AND stroke = $2 AND distance = $3
              AND ($4 IS NULL OR id != $4)
            ORDER BY total_seconds ASC, timestamp DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(athlete_id)
        .bind(stroke.as_str())
        .bind(i64::from(distance))
        .bind(exclude_result)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch total best: {e}")))?;

        Ok(row.map(|row| BestTotal {
            result_id: row.get("id"),
            total_seconds: row.get("total_seconds"),
            timestamp: row.get("timestamp"),
        }))
    }

    /// Best split per segment index, optionally excluding one result row
    ///
    /// The vector spans index 0 through the highest segment ever recorded;
    /// indexes nobody has swum (shorter attempts) come back as `None`.
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn segment_bests(
        &self,
        athlete_id: i64,
        stroke: Stroke,
        distance: u32,
        exclude_result: Option<i64>,
    ) -> AppResult<Vec<Option<f64>>> {
        let rows = sqlx::query(
            r"
            SELECT s.segment_index AS segment_index, MIN(s.split_seconds) AS best_split
            FROM result_segments s
            JOIN results r ON r.id = s.result_id
            WHERE r.athlete_id = $1 AND r.stroke = $2 AND r.distance = $3
              AND ($4 IS NULL OR r.id != $4)
            GROUP BY s.segment_index
            ORDER BY s.segment_index ASC
            ",
        )
        .bind(athlete_id)
        .bind(stroke.as_str())
        .bind(i64::from(distance))
        .bind(exclude_result)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch segment bests: {e}")))?;

        let mut bests: Vec<Option<f64>> = Vec::new();
        for row in &rows {
            let index: i64 = row.get("segment_index");
            let index = usize::try_from(index)
                .map_err(|_| AppError::database(format!("invalid segment index {index}")))?;
            if bests.len() <= index {
                bests.resize(index + 1, None);
            }
            bests[index] = Some(row.get("best_split"));
        }
        Ok(bests)
    }

    /// Segment bests plus their sum for an athlete, stroke, and distance
    ///
    /// # Errors
    ///
    /// Returns a database error when the underlying query fails.
    pub async fn sum_of_best(
        &self,
        athlete_id: i64,
        stroke: Stroke,
        distance: u32,
    ) -> AppResult<SobSnapshot> {
        let segments = self.segment_bests(athlete_id, stroke, distance, None).await?;
        let known: Vec<f64> = segments.iter().copied().flatten().collect();
        let total = if known.is_empty() {
            None
        } else {
            Some(known.iter().sum())
        };
        Ok(SobSnapshot { segments, total })
    }

    /// Latest attempt measured against the history before it
    ///
    /// Prior bests are computed excluding the latest attempt's own row, so the
    /// comparison reads the same no matter when it runs. Returns `None` when
    /// the athlete has no attempts on file; query failures are logged and also
    /// surface as `None`.
    pub async fn compare_last_with_best(
        &self,
        athlete_id: i64,
        stroke: Stroke,
        distance: u32,
    ) -> Option<AttemptComparison> {
        match self
            .compare_last_with_best_impl(athlete_id, stroke, distance)
            .await
        {
            Ok(comparison) => comparison,
            Err(e) => {
                error!(
                    error = %e,
                    athlete_id,
                    stroke = %stroke,
                    distance,
                    "last-vs-best comparison failed"
                );
                None
            }
        }
    }

    async fn compare_last_with_best_impl(
        &self,
        athlete_id: i64,
        stroke: Stroke,
        distance: u32,
    ) -> AppResult<Option<AttemptComparison>> {
        let Some(latest) = self.latest_attempt(athlete_id, stroke, distance).await? else {
            return Ok(None);
        };

        let prior_best = self
            .total_best(athlete_id, stroke, distance, Some(latest.id))
            .await?;
        let prior_segments = self
            .segment_bests(athlete_id, stroke, distance, Some(latest.id))
            .await?;

        let total = detect_total_pr(prior_best.map(|best| best.total_seconds), latest.total_seconds)?;
        let improved = detect_segment_prs(&prior_segments, &latest.splits)?;
        let current_segments: Vec<Option<f64>> = latest.splits.iter().copied().map(Some).collect();
        let sob = calc_sob(&prior_segments, &current_segments)?;

        let segments = latest
            .splits
            .iter()
            .enumerate()
            .map(|(index, split)| SegmentComparison {
                index,
                current: *split,
                previous: prior_segments.get(index).copied().flatten(),
                improved: improved.get(index).copied().unwrap_or(false),
            })
            .collect();

        Ok(Some(AttemptComparison {
            latest,
            total,
            segments,
            sob,
        }))
    }
}
