// ABOUTME: Filtered, paginated search over recorded results
// ABOUTME: Optional athlete/stroke/distance/date/PR filters with page clamping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;

use streamline_core::errors::{AppError, AppResult};
use streamline_core::models::Stroke;

use super::Database;

/// Optional filters for a result search; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Restrict to one athlete
    pub athlete_id: Option<i64>,
    /// Restrict to one stroke
    pub stroke: Option<Stroke>,
    /// Restrict to one distance in meters
    pub distance: Option<u32>,
    /// Keep swims at or after this instant
    pub date_from: Option<DateTime<Utc>>,
    /// Keep swims at or before this instant
    pub date_to: Option<DateTime<Utc>>,
    /// Keep only PR swims
    pub only_pr: bool,
}

/// One row of a search result page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptSummary {
    /// Result row ID
    pub result_id: i64,
    /// Athlete the attempt belongs to
    pub athlete_id: i64,
    /// Display name snapshot; may be empty
    pub athlete_name: String,
    /// Stroke swum
    pub stroke: Stroke,
    /// Distance in meters
    pub distance: u32,
    /// Total time for the swim
    pub total_seconds: f64,
    /// When the swim happened
    pub timestamp: DateTime<Utc>,
    /// Whether the swim set a PR when recorded
    pub is_pr: bool,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Rows on this page, newest first
    pub items: Vec<AttemptSummary>,
    /// Matches across all pages
    pub total: i64,
    /// Page actually returned, after clamping
    pub page: u32,
    /// Page count; at least 1 even with no matches
    pub pages: u32,
}

impl Database {
    /// Search recorded results, newest first
    ///
    /// The requested page is clamped into `[1, pages]`, so asking for page 0
    /// or a page past the end returns the first or last page rather than
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for a zero page size and a database
    /// error when a query fails.
    pub async fn search_results(
        &self,
        filters: &SearchFilters,
        page: u32,
        page_size: u32,
    ) -> AppResult<SearchPage> {
        if page_size == 0 {
            return Err(AppError::invalid_input("page size must be positive"));
        }

        let total: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*)
            FROM results
            WHERE ($1 IS NULL OR athlete_id = $1)
              AND ($2 IS NULL OR stroke = $2)
              AND ($3 IS NULL OR distance = $3)
              AND ($4 IS NULL OR timestamp >= $4)
              AND ($5 IS NULL OR timestamp <= $5)
              AND ($6 = 0 OR is_pr = 1)
            ",
        )
        .bind(filters.athlete_id)
        .bind(filters.stroke.map(|s| s.as_str()))
        .bind(filters.distance.map(i64::from))
        .bind(filters.date_from)
        .bind(filters.date_to)
        .bind(filters.only_pr)
        .fetch_one(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to count search results: {e}")))?;

        let page_len = i64::from(page_size);
        // Ceiling division open-coded: i64::div_ceil is feature-gated on stable
        let pages = ((total + page_len - 1) / page_len).max(1);
        let page = i64::from(page).clamp(1, pages);
        let offset = (page - 1) * page_len;

        let rows = sqlx::query(
            r"
            SELECT id, athlete_id, athlete_name, stroke, distance,
                   total_seconds, timestamp, is_pr
            FROM results
            WHERE ($1 IS NULL OR athlete_id = $1)
              AND ($2 IS NULL OR stroke = $2)
              AND ($3 IS NULL OR distance = $3)
              AND ($4 IS NULL OR timestamp >= $4)
              AND ($5 IS NULL OR timestamp <= $5)
              AND ($6 = 0 OR is_pr = 1)
            ORDER BY timestamp DESC, id DESC
            LIMIT $7 OFFSET $8
            ",
        )
        .bind(filters.athlete_id)
        .bind(filters.stroke.map(|s| s.as_str()))
        .bind(filters.distance.map(i64::from))
        .bind(filters.date_from)
        .bind(filters.date_to)
        .bind(filters.only_pr)
        .bind(page_len)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch search results: {e}")))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let stroke_name: String = row.get("stroke");
            let distance: i64 = row.get("distance");
            items.push(AttemptSummary {
                result_id: row.get("id"),
                athlete_id: row.get("athlete_id"),
                athlete_name: row.get("athlete_name"),
                stroke: Stroke::parse_alias(&stroke_name)?,
                distance: u32::try_from(distance)
                    .map_err(|_| AppError::database(format!("invalid distance {distance}")))?,
                total_seconds: row.get("total_seconds"),
                timestamp: row.get("timestamp"),
                is_pr: row.get("is_pr"),
            });
        }

        Ok(SearchPage {
            items,
            total,
            page: u32::try_from(page).unwrap_or(1),
            pages: u32::try_from(pages).unwrap_or(u32::MAX),
        })
    }
}
