// ABOUTME: SQLite storage layer for sprint results, turns, and audit history
// ABOUTME: Injected pool wrapper with schema migration and per-domain query modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! # Database Management
//!
//! Storage layer for the analytics engine: an injected [`Database`] handle
//! wrapping a `SqlitePool`. Handlers and tests construct their own handle
//! (in-memory SQLite works), so nothing here is a process-wide singleton.
//!
//! Write paths (recording and undoing attempts) propagate database errors.
//! Read-only aggregation views log failures and surface empty results instead,
//! so one broken query cannot take down the whole reporting path.

mod attempts;
mod audit;
mod records;
mod search;
mod stats;
mod team;
mod turns;

pub use attempts::{AttemptDetail, AttemptOutcome, NewAttempt};
pub use audit::{AuditAction, AuditEntry, RESULT_ENTITY};
pub use records::{AttemptComparison, BestTotal, SegmentComparison, SobSnapshot};
pub use search::{AttemptSummary, SearchFilters, SearchPage};
pub use stats::{LeaderboardEntry, WeeklyHighlight, WeeklyProgress};
pub use team::{TeamAthlete, TeamComparison};
pub use turns::{TurnComparison, TurnDelta, TurnObservation, TurnTrend};

use sqlx::{Pool, Sqlite, SqlitePool};

use streamline_core::errors::{AppError, AppResult};

/// Handle to the sprint results store
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect and run schema migration
    ///
    /// SQLite URLs get `?mode=rwc` appended so a missing database file is
    /// created instead of failing the connect.
    ///
    /// # Errors
    ///
    /// Returns a database error when the connection or migration fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the underlying pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run schema migration
    ///
    /// All statements are idempotent (`CREATE ... IF NOT EXISTS`), so calling
    /// this on an already-migrated database is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a database error when any DDL statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_results().await?;
        self.migrate_turn_analysis().await?;
        self.migrate_audit_log().await?;
        Ok(())
    }

    /// Create the results and result_segments tables
    async fn migrate_results(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                athlete_id INTEGER NOT NULL,
                athlete_name TEXT NOT NULL DEFAULT '',
                stroke TEXT NOT NULL,
                distance INTEGER NOT NULL,
                total_seconds REAL NOT NULL,
                timestamp TEXT NOT NULL,
                is_pr INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create results table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS result_segments (
                result_id INTEGER NOT NULL REFERENCES results(id) ON DELETE CASCADE,
                segment_index INTEGER NOT NULL,
                split_seconds REAL NOT NULL,
                PRIMARY KEY (result_id, segment_index)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create result_segments table: {e}")))?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_results_timestamp ON results(timestamp DESC)",
            "CREATE INDEX IF NOT EXISTS idx_results_athlete ON results(athlete_id)",
            "CREATE INDEX IF NOT EXISTS idx_results_stroke ON results(stroke)",
            "CREATE INDEX IF NOT EXISTS idx_results_distance ON results(distance)",
        ] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to create results index: {e}")))?;
        }

        Ok(())
    }

    /// Create the turn_analysis table
    async fn migrate_turn_analysis(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS turn_analysis (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                result_id INTEGER NOT NULL REFERENCES results(id) ON DELETE CASCADE,
                turn_number INTEGER NOT NULL,
                approach_time REAL NOT NULL,
                wall_contact_time REAL NOT NULL,
                push_off_time REAL NOT NULL,
                underwater_time REAL NOT NULL,
                total_turn_time REAL NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create turn_analysis table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_turn_analysis_result ON turn_analysis(result_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create turn_analysis index: {e}")))?;

        Ok(())
    }

    /// Create the audit_log table
    async fn migrate_audit_log(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS audit_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                action TEXT NOT NULL,
                entity_type TEXT NOT NULL,
                entity_id INTEGER NOT NULL,
                before_state TEXT,
                after_state TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create audit_log table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_audit_entity ON audit_log(entity_type, entity_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create audit_log index: {e}")))?;

        Ok(())
    }
}
