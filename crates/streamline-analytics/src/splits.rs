// ABOUTME: Segment analytics over canonical split seconds
// ABOUTME: Elementwise speeds, average speed, pace per 100m, pace degradation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! # Segment Analytics
//!
//! Pure elementwise calculations over a sequence of split times. Splits are
//! canonical seconds (see `streamline_core::time`); segment lengths arrive as
//! [`SegmentLengths`], either one uniform length broadcast across the swim or
//! one length per split.
//!
//! Edge-case policy, fixed across the engine:
//! - a zero split yields speed `0.0` rather than a division error (hand timers
//!   occasionally drop a segment; the attempt is still worth storing),
//! - negative splits and non-positive lengths are rejected outright,
//! - degradation never reports below `0.0` (speeding up is not degradation).

use serde::{Deserialize, Serialize};

use streamline_core::errors::{AppError, AppResult};

/// Segment lengths for one swim: uniform broadcast or one per split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SegmentLengths {
    /// Every segment has the same length in meters
    Uniform(f64),
    /// One length per split, in swim order
    PerSegment(Vec<f64>),
}

impl SegmentLengths {
    /// Expand to one positive length per split
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when any length is not positive or a
    /// per-segment sequence does not match the split count exactly.
    pub fn resolve(&self, split_count: usize) -> AppResult<Vec<f64>> {
        match self {
            Self::Uniform(length) => {
                if *length <= 0.0 {
                    return Err(AppError::invalid_input(format!(
                        "segment length must be positive, got {length}"
                    )));
                }
                Ok(vec![*length; split_count])
            }
            Self::PerSegment(lengths) => {
                if lengths.len() != split_count {
                    return Err(AppError::invalid_input(format!(
                        "expected {split_count} segment lengths, got {}",
                        lengths.len()
                    )));
                }
                if let Some(length) = lengths.iter().find(|length| **length <= 0.0) {
                    return Err(AppError::invalid_input(format!(
                        "segment length must be positive, got {length}"
                    )));
                }
                Ok(lengths.clone())
            }
        }
    }
}

impl From<f64> for SegmentLengths {
    fn from(length: f64) -> Self {
        Self::Uniform(length)
    }
}

impl From<Vec<f64>> for SegmentLengths {
    fn from(lengths: Vec<f64>) -> Self {
        Self::PerSegment(lengths)
    }
}

impl From<&[f64]> for SegmentLengths {
    fn from(lengths: &[f64]) -> Self {
        Self::PerSegment(lengths.to_vec())
    }
}

/// Per-segment speed in meters per second
///
/// Elementwise `length / time`; a zero split yields `0.0` by policy.
///
/// # Errors
///
/// Returns an invalid-time error for negative splits and an invalid-input
/// error for bad segment lengths (non-positive, or count mismatch).
pub fn segment_speeds(splits: &[f64], lengths: impl Into<SegmentLengths>) -> AppResult<Vec<f64>> {
    reject_negative(splits)?;
    let lengths = lengths.into().resolve(splits.len())?;
    Ok(splits
        .iter()
        .zip(&lengths)
        .map(|(time, length)| if *time > 0.0 { length / time } else { 0.0 })
        .collect())
}

/// Average speed across the whole swim in meters per second
///
/// `distance / sum(splits)`; a zero total yields `0.0` by policy.
///
/// # Errors
///
/// Returns an invalid-input error for a non-positive distance and an
/// invalid-time error for negative splits.
pub fn avg_speed(splits: &[f64], distance: f64) -> AppResult<f64> {
    if distance <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "distance must be positive, got {distance}"
        )));
    }
    reject_negative(splits)?;
    let total: f64 = splits.iter().sum();
    if total > 0.0 {
        Ok(distance / total)
    } else {
        Ok(0.0)
    }
}

/// Per-segment pace in seconds per 100 meters
///
/// Elementwise `time / length * 100`.
///
/// # Errors
///
/// Same validation as [`segment_speeds`].
pub fn pace_per_100(splits: &[f64], lengths: impl Into<SegmentLengths>) -> AppResult<Vec<f64>> {
    reject_negative(splits)?;
    let lengths = lengths.into().resolve(splits.len())?;
    Ok(splits
        .iter()
        .zip(&lengths)
        .map(|(time, length)| time / length * 100.0)
        .collect())
}

/// Pace degradation from the first segment to the last, in percent
///
/// `(v0 - vn) / v0 * 100` over segment speeds, floored at `0.0`. Fewer than
/// two splits, or a first segment with no measurable speed, reports `0.0`.
///
/// # Errors
///
/// Same validation as [`segment_speeds`]; the validation applies even when
/// the result would be the trivial `0.0`.
pub fn degradation_percent(
    splits: &[f64],
    lengths: impl Into<SegmentLengths>,
) -> AppResult<f64> {
    let speeds = segment_speeds(splits, lengths)?;
    let (Some(first), Some(last)) = (speeds.first(), speeds.last()) else {
        return Ok(0.0);
    };
    if speeds.len() < 2 || *first <= 0.0 {
        return Ok(0.0);
    }
    Ok(((first - last) / first * 100.0).max(0.0))
}

/// Shared guard: split times are canonical non-negative seconds
fn reject_negative(splits: &[f64]) -> AppResult<()> {
    if let Some(split) = splits.iter().find(|split| **split < 0.0) {
        return Err(AppError::invalid_time(format!("negative split {split}")));
    }
    Ok(())
}
