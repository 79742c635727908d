// ABOUTME: Unified error handling for the Streamline analytics engine
// ABOUTME: Standard error codes, the AppError type, and convenience constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! # Unified Error Handling
//!
//! Centralized error types for the Streamline workspace. Every fallible
//! operation returns [`AppResult`], and all failures carry an [`ErrorCode`]
//! from a stable numeric space so callers can branch on failure class without
//! string matching.
//!
//! Policy summary:
//! - Invalid numeric input (malformed time, non-positive length, unknown
//!   stroke) fails fast at the function boundary with a validation code.
//! - Missing history is `None`/empty, never an error.
//! - Storage failures in read-only aggregation views are logged by the caller
//!   and converted to empty defaults; write-path storage failures propagate.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
///
/// Numeric spaces: validation 1000-1999, resource 2000-2999, storage
/// 3000-3999, configuration 4000-4999, internal 5000-5999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Input validation (1000-1999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 1000,
    #[serde(rename = "INVALID_TIME_FORMAT")]
    InvalidTimeFormat = 1001,
    #[serde(rename = "SPLITS_MISMATCH")]
    SplitsMismatch = 1002,
    #[serde(rename = "UNKNOWN_STROKE")]
    UnknownStroke = 1003,

    // Resource lookup (2000-2999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 2000,

    // Storage (3000-3999)
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 3000,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 3001,

    // Configuration (4000-4999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 4000,

    // Internal (5000-5999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 5000,
}

impl ErrorCode {
    /// Get a user-friendly description of this error class
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidTimeFormat => "The time value could not be parsed",
            Self::SplitsMismatch => "Split times do not add up to the declared total",
            Self::UnknownStroke => "The stroke name is not recognized",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization failed",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::InvalidTimeFormat => "INVALID_TIME_FORMAT",
            Self::SplitsMismatch => "SPLITS_MISMATCH",
            Self::UnknownStroke => "UNKNOWN_STROKE",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{name}")
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Athlete ID if the failure relates to one athlete's data
    pub athlete_id: Option<i64>,
    /// Resource ID if applicable (result row, audit entry)
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            athlete_id: None,
            resource_id: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Attach an athlete ID to the error context
    #[must_use]
    pub const fn with_athlete_id(mut self, athlete_id: i64) -> Self {
        self.context.athlete_id = Some(athlete_id);
        self
    }

    /// Attach a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Attach structured details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors for common errors
impl AppError {
    /// Invalid input at a function boundary
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Malformed time string or negative time value
    pub fn invalid_time(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTimeFormat, message)
    }

    /// Split sum disagrees with the declared total beyond tolerance
    pub fn splits_mismatch(total: f64, splits_sum: f64) -> Self {
        Self::new(
            ErrorCode::SplitsMismatch,
            format!("splits sum {splits_sum:.2} does not match total {total:.2}"),
        )
        .with_details(serde_json::json!({
            "total": total,
            "splits_sum": splits_sum,
        }))
    }

    /// Unrecognized stroke name or alias
    pub fn unknown_stroke(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(ErrorCode::UnknownStroke, format!("unknown stroke '{name}'"))
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::new(ErrorCode::ResourceNotFound, format!("{resource} not found"))
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}
