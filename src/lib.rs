// ABOUTME: Main library entry point for the Streamline sprint analytics engine
// ABOUTME: Wires configuration, logging, and the SQLite-backed storage layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

#![deny(unsafe_code)]

//! # Streamline
//!
//! Sprint analytics engine for competitive swim squads. Coaches record timed
//! attempts (total time, per-segment splits, per-turn phase measurements) and
//! the engine answers the questions that matter on deck: was that a PR, where
//! did the pace fall apart, which turn is bleeding time, who improved this
//! week.
//!
//! ## Features
//!
//! - **Time normalization**: `MM:SS.fff` and plain-seconds input to canonical
//!   seconds, with strict validation
//! - **Segment analytics**: per-segment speed, pace per 100m, and pace
//!   degradation across a swim
//! - **Record detection**: total-time PRs, per-segment bests, and Sum of Best
//!   with strict-improvement semantics
//! - **Turn analysis**: 0-100 efficiency scores against per-stroke norms plus
//!   coaching recommendations
//! - **Aggregations**: leaderboards, weekly progress, turn trends, team
//!   comparisons, and paginated search over a SQLite store
//!
//! ## Architecture
//!
//! Three layers, pure at the bottom:
//! - `streamline-core`: canonical types, time parsing, reference norms, errors
//! - `streamline-analytics`: pure calculations over canonical values
//! - `streamline` (this crate): configuration, logging, and the async storage
//!   layer that feeds stored rows into the analytics
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use streamline::config::environment::ServiceConfig;
//! use streamline::database::Database;
//! use streamline_core::errors::AppResult;
//! use streamline_core::models::Period;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServiceConfig::from_env()?;
//!     let database =
//!         Database::new(&config.database.url.to_connection_string()).await?;
//!
//!     let leaderboard = database
//!         .leaderboard(Period::Week, config.analytics.leaderboard_limit)
//!         .await;
//!     println!("{} athletes set a PR this week", leaderboard.len());
//!
//!     Ok(())
//! }
//! ```

/// Service configuration from environment variables
pub mod config;

/// SQLite storage layer and aggregation queries
pub mod database;

/// Structured logging setup
pub mod logging;

pub use database::Database;
