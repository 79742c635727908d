// ABOUTME: Pure analytics for swim sprints: splits, records, turns, trends
// ABOUTME: Side-effect-free functions consumed by the storage and reporting layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

#![deny(unsafe_code)]

//! # Streamline Analytics
//!
//! The numeric core of the Streamline platform. Everything in this crate is a
//! pure function over canonical seconds: no I/O, no shared state, safe to call
//! concurrently from any number of tasks. The storage layer feeds these
//! functions with history read from SQLite and persists what they return.
//!
//! ## Modules
//!
//! - **splits**: per-segment speed, pace per 100m, and degradation
//! - **records**: personal-record detection and the Sum of Best construction
//! - **turns**: 0-100 turn efficiency scoring and coaching recommendations
//! - **trends**: least-squares trend fitting for chronological series

/// Per-segment speed, average speed, pace, and degradation calculations
pub mod splits;

/// Personal-record detection and Sum-of-Best aggregation
pub mod records;

/// Turn efficiency scoring against stroke reference norms
pub mod turns;

/// Least-squares trend analysis over chronological series
pub mod trends;
