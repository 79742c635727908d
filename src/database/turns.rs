// ABOUTME: Turn-efficiency views joined from results and turn_analysis
// ABOUTME: Chronological observations, per-turn trends, and window comparisons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::error;

use streamline_analytics::trends::TrendSummary;
use streamline_core::errors::{AppError, AppResult};
use streamline_core::models::{Period, Stroke, TurnPhases};

use super::Database;

/// One measured turn, joined with the swim it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnObservation {
    /// Result the turn was swum in
    pub result_id: i64,
    /// Turn position within the swim, starting at 1
    pub turn_number: i64,
    /// Measured phase durations
    pub phases: TurnPhases,
    /// Sum of the four phases
    pub total_turn_time: f64,
    /// When the swim happened
    pub timestamp: DateTime<Utc>,
}

/// How one turn number is trending over an athlete's history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnTrend {
    /// Turn position within the swim, starting at 1
    pub turn_number: i64,
    /// Observations behind the trend
    pub samples: usize,
    /// Least-squares slope of total turn time over time; negative means
    /// the turn is getting faster
    pub efficiency_trend: f64,
    /// First-to-last change as a percentage of the first observation
    pub improvement_rate: f64,
}

/// One turn number's averages across two consecutive windows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnDelta {
    /// Turn position within the swim, starting at 1
    pub turn_number: i64,
    /// Average total turn time in the earlier window, when observed there
    pub previous_avg: Option<f64>,
    /// Average total turn time in the later window, when observed there
    pub current_avg: Option<f64>,
    /// `previous_avg - current_avg`; positive means the turn got faster
    pub delta: Option<f64>,
    /// Delta as a percentage of the earlier average
    pub percent_change: Option<f64>,
}

/// Turn averages over the trailing window against the window before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnComparison {
    /// Window length used for both sides
    pub period: Period,
    /// Per-turn-number comparison, ordered by turn number
    pub comparisons: Vec<TurnDelta>,
}

impl Database {
    /// Every measured turn for an athlete and stroke, oldest swim first
    ///
    /// Within a swim, turns come back in swim order.
    ///
    /// # Errors
    ///
    /// Returns a database error when the query fails.
    pub async fn turn_observations(
        &self,
        athlete_id: i64,
        stroke: Stroke,
    ) -> AppResult<Vec<TurnObservation>> {
        let rows = sqlx::query(
            r"
            SELECT r.id AS result_id, t.turn_number,
                   t.approach_time, t.wall_contact_time,
                   t.push_off_time, t.underwater_time,
                   t.total_turn_time, r.timestamp
            FROM turn_analysis t
            JOIN results r ON r.id = t.result_id
            WHERE r.athlete_id = $1 AND r.stroke = $2
            ORDER BY r.timestamp ASC, r.id ASC, t.turn_number ASC
            ",
        )
        .bind(athlete_id)
        .bind(stroke.as_str())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch turn observations: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| TurnObservation {
                result_id: row.get("result_id"),
                turn_number: row.get("turn_number"),
                phases: TurnPhases {
                    approach: row.get("approach_time"),
                    wall_contact: row.get("wall_contact_time"),
                    push_off: row.get("push_off_time"),
                    underwater: row.get("underwater_time"),
                },
                total_turn_time: row.get("total_turn_time"),
                timestamp: row.get("timestamp"),
            })
            .collect())
    }

    /// Per-turn-number trend over an athlete's full history for a stroke
    ///
    /// Each turn number gets its own least-squares fit over that turn's total
    /// times in swim order. Turn numbers with fewer than two observations
    /// report flat trends. Query failures are logged and surface as an empty
    /// list.
    pub async fn turn_trend(&self, athlete_id: i64, stroke: Stroke) -> Vec<TurnTrend> {
        match self.turn_trend_impl(athlete_id, stroke).await {
            Ok(trends) => trends,
            Err(e) => {
                error!(error = %e, athlete_id, stroke = %stroke, "turn trend query failed");
                Vec::new()
            }
        }
    }

    async fn turn_trend_impl(&self, athlete_id: i64, stroke: Stroke) -> AppResult<Vec<TurnTrend>> {
        let observations = self.turn_observations(athlete_id, stroke).await?;

        let mut series: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
        for observation in &observations {
            series
                .entry(observation.turn_number)
                .or_default()
                .push(observation.total_turn_time);
        }

        Ok(series
            .into_iter()
            .map(|(turn_number, values)| {
                let summary = TrendSummary::from_values(&values);
                TurnTrend {
                    turn_number,
                    samples: values.len(),
                    efficiency_trend: summary.slope,
                    improvement_rate: summary.improvement_rate,
                }
            })
            .collect())
    }

    /// Average turn times over the trailing window against the window before
    ///
    /// Current window is the trailing `period`, previous is the `period`
    /// directly before it. Turn numbers observed on only one side report
    /// `None` deltas. Query failures are logged and surface as an empty
    /// comparison.
    pub async fn compare_turn_efficiency(&self, athlete_id: i64, period: Period) -> TurnComparison {
        match self.compare_turn_efficiency_impl(athlete_id, period).await {
            Ok(comparison) => comparison,
            Err(e) => {
                error!(error = %e, athlete_id, period = %period, "turn comparison query failed");
                TurnComparison {
                    period,
                    comparisons: Vec::new(),
                }
            }
        }
    }

    async fn compare_turn_efficiency_impl(
        &self,
        athlete_id: i64,
        period: Period,
    ) -> AppResult<TurnComparison> {
        let now = Utc::now();
        let current_start = now - Duration::days(period.days());
        let previous_start = current_start - Duration::days(period.days());

        let previous = self
            .window_turn_averages(athlete_id, previous_start, current_start)
            .await?;
        let current = self.window_turn_averages(athlete_id, current_start, now).await?;

        let mut turn_numbers: BTreeSet<i64> = previous.keys().copied().collect();
        turn_numbers.extend(current.keys().copied());

        let comparisons = turn_numbers
            .into_iter()
            .map(|turn_number| {
                let previous_avg = previous.get(&turn_number).copied();
                let current_avg = current.get(&turn_number).copied();
                let delta = match (previous_avg, current_avg) {
                    (Some(previous), Some(current)) => Some(previous - current),
                    _ => None,
                };
                let percent_change = match (previous_avg, delta) {
                    (Some(previous), Some(delta)) if previous > 0.0 => {
                        Some(delta / previous * 100.0)
                    }
                    _ => None,
                };
                TurnDelta {
                    turn_number,
                    previous_avg,
                    current_avg,
                    delta,
                    percent_change,
                }
            })
            .collect();

        Ok(TurnComparison { period, comparisons })
    }

    /// Average total turn time per turn number inside `[start, end)`
    async fn window_turn_averages(
        &self,
        athlete_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<BTreeMap<i64, f64>> {
        let rows = sqlx::query(
            r"
            SELECT t.turn_number, AVG(t.total_turn_time) AS avg_time
            FROM turn_analysis t
            JOIN results r ON r.id = t.result_id
            WHERE r.athlete_id = $1 AND r.timestamp >= $2 AND r.timestamp < $3
            GROUP BY t.turn_number
            ",
        )
        .bind(athlete_id)
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch turn averages: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| (row.get::<i64, _>("turn_number"), row.get::<f64, _>("avg_time")))
            .collect())
    }
}
