// ABOUTME: Core types and constants for the Streamline swim analytics engine
// ABOUTME: Foundation crate with error handling, stroke models, and time parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

#![deny(unsafe_code)]

//! # Streamline Core
//!
//! Foundation crate providing shared types for the Streamline sprint analytics
//! engine. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Stroke taxonomy and turn phase types shared across the workspace
//! - **time**: Canonical seconds conversion, split validation, and display formatting
//! - **constants**: Turn reference norms, coaching thresholds, and window lengths

/// Unified error handling system with standard error codes
pub mod errors;

/// Stroke taxonomy, turn phases, and attempt metadata shared across crates
pub mod models;

/// Time normalization: canonical float seconds from heterogeneous inputs
pub mod time;

/// Reference norms and analytic thresholds organized by domain
pub mod constants;
