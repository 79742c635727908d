// ABOUTME: Team-wide statistics views over recorded results
// ABOUTME: PR leaderboard and weekly athlete progress summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::error;

use streamline_core::constants::defaults;
use streamline_core::errors::{AppError, AppResult};
use streamline_core::models::{Period, Stroke};

use super::Database;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Athlete the row belongs to
    pub athlete_id: i64,
    /// Display name, or `ID <athlete_id>` when no name was ever recorded
    pub name: String,
    /// PRs set inside the window
    pub pr_count: i64,
    /// Attempts recorded inside the window
    pub attempts: i64,
}

/// One highlighted swim from the trailing week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyHighlight {
    /// Result row ID
    pub result_id: i64,
    /// Stroke swum
    pub stroke: Stroke,
    /// Distance in meters
    pub distance: u32,
    /// Total time for the swim
    pub total_seconds: f64,
    /// Whether the swim set a PR
    pub is_pr: bool,
    /// When the swim happened
    pub timestamp: DateTime<Utc>,
}

/// An athlete's trailing-week summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    /// Attempts recorded in the window
    pub attempts: i64,
    /// PRs set in the window
    pub prs: i64,
    /// Up to three standout swims, PRs first, then fastest, then most recent
    pub highlights: Vec<WeeklyHighlight>,
}

impl Database {
    /// PR leaderboard over a trailing window
    ///
    /// Only athletes with at least one PR in the window appear. Ordered by PR
    /// count, then attempt count, then case-insensitive name. Query failures
    /// are logged and surface as an empty leaderboard.
    pub async fn leaderboard(&self, period: Period, limit: u32) -> Vec<LeaderboardEntry> {
        match self.leaderboard_impl(period, limit).await {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, period = %period, "leaderboard query failed");
                Vec::new()
            }
        }
    }

    async fn leaderboard_impl(&self, period: Period, limit: u32) -> AppResult<Vec<LeaderboardEntry>> {
        let window_start = Utc::now() - Duration::days(period.days());
        let rows = sqlx::query(
            r"
            SELECT athlete_id,
                   COALESCE(NULLIF(TRIM(athlete_name), ''), 'ID ' || athlete_id) AS name,
                   SUM(CASE WHEN is_pr = 1 THEN 1 ELSE 0 END) AS pr_count,
                   COUNT(*) AS attempts
            FROM results
            WHERE timestamp >= $1
            GROUP BY athlete_id
            HAVING pr_count > 0
            ORDER BY pr_count DESC, attempts DESC, name COLLATE NOCASE ASC
            LIMIT $2
            ",
        )
        .bind(window_start)
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch leaderboard: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| LeaderboardEntry {
                athlete_id: row.get("athlete_id"),
                name: row.get("name"),
                pr_count: row.get("pr_count"),
                attempts: row.get("attempts"),
            })
            .collect())
    }

    /// Trailing-week summary for one athlete
    ///
    /// Attempt and PR counts over the last 7 days plus up to
    /// [`defaults::WEEKLY_HIGHLIGHT_LIMIT`] standout swims. Query failures are
    /// logged and surface as an empty summary.
    pub async fn weekly_progress(&self, athlete_id: i64) -> WeeklyProgress {
        match self.weekly_progress_impl(athlete_id).await {
            Ok(progress) => progress,
            Err(e) => {
                error!(error = %e, athlete_id, "weekly progress query failed");
                WeeklyProgress::default()
            }
        }
    }

    async fn weekly_progress_impl(&self, athlete_id: i64) -> AppResult<WeeklyProgress> {
        let window_start = Utc::now() - Duration::days(Period::Week.days());

        let counts = sqlx::query(
            r"
            SELECT COUNT(*) AS attempts,
                   COALESCE(SUM(CASE WHEN is_pr = 1 THEN 1 ELSE 0 END), 0) AS prs
            FROM results
            WHERE athlete_id = $1 AND timestamp >= $2
            ",
        )
        .bind(athlete_id)
        .bind(window_start)
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch weekly counts: {e}")))?;

        let rows = sqlx::query(
            r"
            SELECT id, stroke, distance, total_seconds, is_pr, timestamp
            FROM results
            WHERE athlete_id = $1 AND timestamp >= $2
            ORDER BY is_pr DESC, total_seconds ASC, timestamp DESC
            LIMIT $3
            ",
        )
        .bind(athlete_id)
        .bind(window_start)
        .bind(i64::from(defaults::WEEKLY_HIGHLIGHT_LIMIT))
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch weekly highlights: {e}")))?;

        let mut highlights = Vec::with_capacity(rows.len());
        for row in &rows {
            let stroke_name: String = row.get("stroke");
            let distance: i64 = row.get("distance");
            highlights.push(WeeklyHighlight {
                result_id: row.get("id"),
                stroke: Stroke::parse_alias(&stroke_name)?,
                distance: u32::try_from(distance)
                    .map_err(|_| AppError::database(format!("invalid distance {distance}")))?,
                total_seconds: row.get("total_seconds"),
                is_pr: row.get("is_pr"),
                timestamp: row.get("timestamp"),
            });
        }

        Ok(WeeklyProgress {
            attempts: counts.get("attempts"),
            prs: counts.get("prs"),
            highlights,
        })
    }
}
