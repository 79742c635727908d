// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Typed log level, environment, database URL, and analytics limit parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! Environment-based configuration management

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use streamline_core::constants::defaults;
use streamline_core::errors::{AppError, AppResult};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything, including per-query noise
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }

    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Live deployment
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback to `Development`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory SQLite, for tests and throwaway sessions
    Memory,
}

impl DatabaseUrl {
    /// Parse from a connection string
    ///
    /// Accepts `sqlite:` URLs; anything else is treated as a bare SQLite file
    /// path.
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to a connection string for the pool
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/streamline.db"),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Where the results database lives
    pub url: DatabaseUrl,
    /// Run schema migration on startup
    pub auto_migrate: bool,
}

/// Tunable analytics limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Allowed drift between a hand-entered total and the sum of its splits
    pub split_tolerance_seconds: f64,
    /// Leaderboard row cap
    pub leaderboard_limit: u32,
    /// Result-search page size
    pub search_page_size: u32,
}

/// Full service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Storage settings
    pub database: DatabaseConfig,
    /// Analytics limits
    pub analytics: AnalyticsConfig,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to development defaults; set-but-invalid
    /// values are an error rather than a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns a config error when a numeric variable does not parse or a
    /// limit is out of range.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    "DATABASE_URL",
                    &DatabaseUrl::default().to_connection_string(),
                )),
                auto_migrate: parse_env_var("AUTO_MIGRATE", true)?,
            },
            analytics: AnalyticsConfig {
                split_tolerance_seconds: parse_env_var(
                    "SPLIT_TOLERANCE_SECONDS",
                    defaults::SPLIT_TOLERANCE_SECONDS,
                )?,
                leaderboard_limit: parse_env_var("LEADERBOARD_LIMIT", defaults::LEADERBOARD_LIMIT)?,
                search_page_size: parse_env_var("SEARCH_PAGE_SIZE", defaults::SEARCH_PAGE_SIZE)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Streamline Configuration:\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - Auto Migrate: {}\n\
             - Split Tolerance: {:.2}s\n\
             - Leaderboard Limit: {}\n\
             - Search Page Size: {}",
            self.environment,
            self.log_level,
            self.database.url,
            self.database.auto_migrate,
            self.analytics.split_tolerance_seconds,
            self.analytics.leaderboard_limit,
            self.analytics.search_page_size,
        )
    }

    fn validate(&self) -> AppResult<()> {
        if self.analytics.split_tolerance_seconds < 0.0 {
            return Err(AppError::config(format!(
                "SPLIT_TOLERANCE_SECONDS must be non-negative, got {}",
                self.analytics.split_tolerance_seconds
            )));
        }
        if self.analytics.search_page_size == 0 {
            return Err(AppError::config("SEARCH_PAGE_SIZE must be positive"));
        }
        if self.analytics.leaderboard_limit == 0 {
            return Err(AppError::config("LEADERBOARD_LIMIT must be positive"));
        }
        Ok(())
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to the default when unset
fn parse_env_var<T: std::str::FromStr>(key: &str, default: T) -> AppResult<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value: {e}"))),
        Err(_) => Ok(default),
    }
}
