// ABOUTME: Configuration management for the analytics service
// ABOUTME: Environment-driven settings for storage, logging, and analytics limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! Configuration module
//!
//! Centralized configuration for the analytics engine and its binaries:
//!
//! - **Environment**: Service configuration from environment variables

/// Environment and service configuration
pub mod environment;

pub use environment::{
    AnalyticsConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServiceConfig,
};
