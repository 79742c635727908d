// ABOUTME: Side-by-side team comparison over latest attempts
// ABOUTME: Per-athlete splits, pace per 100m, SoB total, and per-index averages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use streamline_core::errors::{AppError, AppResult};
use streamline_core::models::Stroke;
use streamline_core::time::default_segment_lengths;

use super::Database;

/// One athlete's side of a team comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAthlete {
    /// Athlete the row belongs to
    pub athlete_id: i64,
    /// Display name, or `ID <athlete_id>` when no name was recorded
    pub name: String,
    /// Total time of the latest attempt
    pub total_seconds: f64,
    /// When the latest attempt happened
    pub timestamp: DateTime<Utc>,
    /// Splits of the latest attempt, in segment order
    pub splits: Vec<f64>,
    /// Pace per 100m per segment; `0.0` where a pace cannot be computed
    pub paces: Vec<f64>,
    /// Athlete's Sum of Best for this stroke and distance, when one exists
    pub sob_total: Option<f64>,
}

/// Latest attempts of several athletes over the same stroke and distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamComparison {
    /// One row per athlete with at least one attempt, in request order
    pub athletes: Vec<TeamAthlete>,
    /// Average pace per segment index over the athletes that swam that index
    pub average_pace: Vec<Option<f64>>,
}

impl Database {
    /// Compare several athletes' latest attempts for one stroke and distance
    ///
    /// Athletes without an attempt on file are skipped with a log line.
    /// Segment lengths come from the declared distance; when an attempt's
    /// split count does not match the standard layout the distance is divided
    /// evenly instead.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when none of the requested athletes has
    /// an attempt, and a database error when a query fails.
    pub async fn team_comparison(
        &self,
        athlete_ids: &[i64],
        stroke: Stroke,
        distance: u32,
    ) -> AppResult<TeamComparison> {
        let mut athletes = Vec::with_capacity(athlete_ids.len());
        for &athlete_id in athlete_ids {
            let Some(latest) = self.latest_attempt(athlete_id, stroke, distance).await? else {
                debug!(athlete_id, stroke = %stroke, distance, "no attempts on file, skipping");
                continue;
            };

            let paces = segment_paces(&latest.splits, distance);
            let sob_total = self.sum_of_best(athlete_id, stroke, distance).await?.total;
            let name = if latest.athlete_name.trim().is_empty() {
                format!("ID {athlete_id}")
            } else {
                latest.athlete_name.clone()
            };

            athletes.push(TeamAthlete {
                athlete_id,
                name,
                total_seconds: latest.total_seconds,
                timestamp: latest.timestamp,
                splits: latest.splits,
                paces,
                sob_total,
            });
        }

        if athletes.is_empty() {
            return Err(AppError::invalid_input(
                "no attempts on file for any requested athlete",
            ));
        }

        let average_pace = average_paces(&athletes);
        Ok(TeamComparison {
            athletes,
            average_pace,
        })
    }
}

/// Pace per 100m per split, tolerant of irregular layouts
///
/// Uses the standard segment layout for the distance when the split count
/// matches, otherwise divides the distance evenly. Unusable segments (zero
/// length) report `0.0` rather than failing the whole comparison.
fn segment_paces(splits: &[f64], distance: u32) -> Vec<f64> {
    if splits.is_empty() {
        return Vec::new();
    }
    let standard = default_segment_lengths(distance);
    let lengths = if standard.len() == splits.len() {
        standard
    } else {
        let even = f64::from(distance) / splits.len() as f64;
        vec![even; splits.len()]
    };
    splits
        .iter()
        .zip(&lengths)
        .map(|(split, length)| {
            if *length > 0.0 {
                split / length * 100.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Mean pace per segment index over the athletes that swam that index
fn average_paces(athletes: &[TeamAthlete]) -> Vec<Option<f64>> {
    let segment_count = athletes
        .iter()
        .map(|athlete| athlete.paces.len())
        .max()
        .unwrap_or(0);

    (0..segment_count)
        .map(|index| {
            let present: Vec<f64> = athletes
                .iter()
                .filter_map(|athlete| athlete.paces.get(index).copied())
                .collect();
            if present.is_empty() {
                None
            } else {
                Some(present.iter().sum::<f64>() / present.len() as f64)
            }
        })
        .collect()
}
