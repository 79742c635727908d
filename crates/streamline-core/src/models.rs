// ABOUTME: Stroke taxonomy and turn phase types for swim sprint analytics
// ABOUTME: Defines supported strokes with alias parsing and display implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// Enumeration of supported competitive strokes
///
/// Covers the four stroke disciplines plus individual medley. Parsing accepts
/// common coaching shorthand (`free`, `fly`, ...) and fails on anything else;
/// there is deliberately no catch-all variant, so every stored stroke is one
/// of these five.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stroke {
    /// Front crawl
    Freestyle,
    /// Backstroke
    Backstroke,
    /// Breaststroke
    Breaststroke,
    /// Butterfly
    Butterfly,
    /// Individual medley (no single-stroke turn norms apply)
    Medley,
}

impl Stroke {
    /// Parse a stroke name or coaching alias
    ///
    /// Accepted aliases: `free`, `crawl`, `front crawl` (freestyle), `back`
    /// (backstroke), `breast` (breaststroke), `fly` (butterfly). Matching is
    /// case-insensitive and ignores surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::UnknownStroke`] for anything else,
    /// including swim styles without competition norms (`sidestroke`).
    pub fn parse_alias(name: &str) -> AppResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "freestyle" | "free" | "crawl" | "front crawl" => Ok(Self::Freestyle),
            "backstroke" | "back" => Ok(Self::Backstroke),
            "breaststroke" | "breast" => Ok(Self::Breaststroke),
            "butterfly" | "fly" => Ok(Self::Butterfly),
            "medley" => Ok(Self::Medley),
            _ => Err(AppError::unknown_stroke(name.trim())),
        }
    }

    /// Canonical lowercase name, matching the stored database value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Freestyle => "freestyle",
            Self::Backstroke => "backstroke",
            Self::Breaststroke => "breaststroke",
            Self::Butterfly => "butterfly",
            Self::Medley => "medley",
        }
    }

    /// Get the human-readable name for this stroke
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Freestyle => "freestyle",
            Self::Backstroke => "backstroke",
            Self::Breaststroke => "breaststroke",
            Self::Butterfly => "butterfly",
            Self::Medley => "individual medley",
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stroke {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_alias(s)
    }
}

/// Durations of the four phases of one wall turn, in seconds
///
/// Phase order follows the swim: approach into the wall, wall contact,
/// push-off, underwater travel to breakout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnPhases {
    /// Final approach into the wall
    pub approach: f64,
    /// Hand or feet contact with the wall
    pub wall_contact: f64,
    /// Push-off from the wall
    pub push_off: f64,
    /// Underwater phase up to breakout
    pub underwater: f64,
}

impl TurnPhases {
    /// Build from the first four values of a measured segment sequence
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when fewer than four durations are
    /// provided; extra values beyond the fourth are ignored.
    pub fn from_segments(segments: &[f64]) -> AppResult<Self> {
        if segments.len() < 4 {
            return Err(AppError::invalid_input(format!(
                "turn analysis needs 4 phase durations, got {}",
                segments.len()
            )));
        }
        Ok(Self {
            approach: segments[0],
            wall_contact: segments[1],
            push_off: segments[2],
            underwater: segments[3],
        })
    }

    /// Phase durations in swim order
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [
            self.approach,
            self.wall_contact,
            self.push_off,
            self.underwater,
        ]
    }

    /// Total wall-turn duration
    #[must_use]
    pub fn total(&self) -> f64 {
        self.approach + self.wall_contact + self.push_off + self.underwater
    }
}

/// Trailing window used by leaderboard and comparison views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Trailing 7 days
    #[default]
    Week,
    /// Trailing 30 days
    Month,
}

impl Period {
    /// Window length in days
    #[must_use]
    pub const fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}
