// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database setup and attempt construction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

//! Shared test utilities for `streamline`
//!
//! Common setup functions to reduce duplication across integration tests.

use std::sync::Once;

use anyhow::Result;
use chrono::{Duration, Utc};

use streamline::database::{Database, NewAttempt};
use streamline_analytics::turns::norms_for;
use streamline_core::models::{Stroke, TurnPhases};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; default keeps test output quiet
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(database)
}

/// A 50m freestyle attempt with sensible defaults; tests override what they
/// need via struct update syntax
pub fn sprint_attempt(athlete_id: i64, total_seconds: f64, splits: &[f64]) -> NewAttempt {
    NewAttempt {
        athlete_id,
        athlete_name: format!("Athlete {athlete_id}"),
        stroke: Stroke::Freestyle,
        distance: 50,
        total_seconds,
        splits: splits.to_vec(),
        turns: Vec::new(),
        timestamp: Utc::now(),
        recorded_by: 99,
    }
}

/// Same as [`sprint_attempt`] but backdated a number of days
pub fn attempt_days_ago(
    athlete_id: i64,
    total_seconds: f64,
    splits: &[f64],
    days: i64,
) -> NewAttempt {
    NewAttempt {
        timestamp: Utc::now() - Duration::days(days),
        ..sprint_attempt(athlete_id, total_seconds, splits)
    }
}

/// Turns at a uniform multiple of the stroke norms, so the expected total
/// turn time is easy to compute in assertions
pub fn scaled_turns(stroke: Stroke, count: usize, scale: f64) -> Vec<TurnPhases> {
    let Ok(norms) = norms_for(stroke) else {
        return Vec::new();
    };
    (0..count)
        .map(|_| TurnPhases {
            approach: norms.approach * scale,
            wall_contact: norms.wall_contact * scale,
            push_off: norms.push_off * scale,
            underwater: norms.underwater * scale,
        })
        .collect()
}
