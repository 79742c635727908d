// ABOUTME: Time normalization for sprint results: canonical float seconds
// ABOUTME: Sum-type inputs, MM:SS.ss parsing, split validation, display formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! # Time Normalization
//!
//! Every duration in the engine is a canonical `f64` of seconds. Inputs arrive
//! in three shapes, closed over by [`TimeValue`]: raw seconds, a
//! [`chrono::Duration`], or coach-entered text. Conversion happens once, at
//! [`TimeValue::into_seconds`], never scattered through the arithmetic.
//!
//! The text grammar matches what coaches type on deck: `M:SS`, `M:SS.ff`,
//! bare seconds like `32.1`, with `,` tolerated as the decimal separator.
//!
//! ```
//! use streamline_core::time::parse_time;
//!
//! let seconds = parse_time("1:05.30")?;
//! assert!((seconds - 65.3).abs() < 1e-9);
//! # Ok::<(), streamline_core::errors::AppError>(())
//! ```

use chrono::Duration;

use crate::errors::{AppError, AppResult};

/// A duration input in one of the accepted shapes
///
/// The closed set replaces ad-hoc "number or string" handling: callers convert
/// into `TimeValue` at the boundary and the rest of the engine only ever sees
/// canonical seconds.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    /// Already-canonical seconds
    Seconds(f64),
    /// A signed duration, converted at millisecond precision
    Duration(Duration),
    /// Coach-entered text in `M:SS[.fff]` or plain-seconds form
    Text(String),
}

impl TimeValue {
    /// Convert into canonical non-negative seconds
    ///
    /// # Errors
    ///
    /// Returns an invalid-time error when the value is negative or the text
    /// form does not parse.
    pub fn into_seconds(self) -> AppResult<f64> {
        let seconds = match self {
            Self::Seconds(value) => value,
            Self::Duration(duration) => duration.num_milliseconds() as f64 / 1000.0,
            Self::Text(text) => parse_time(&text)?,
        };
        if seconds < 0.0 {
            return Err(AppError::invalid_time(format!(
                "negative time value {seconds}"
            )));
        }
        Ok(seconds)
    }
}

impl From<f64> for TimeValue {
    fn from(seconds: f64) -> Self {
        Self::Seconds(seconds)
    }
}

impl From<Duration> for TimeValue {
    fn from(duration: Duration) -> Self {
        Self::Duration(duration)
    }
}

impl From<&str> for TimeValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for TimeValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Parse a result time string into seconds
///
/// Accepts `M+:SS[.fff]` (seconds 0-59, fraction up to three digits) or plain
/// decimal seconds; `,` works as the decimal separator in either form.
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns an invalid-time error for empty input, non-digit characters, a
/// seconds part of 60 or more, or a malformed fraction.
pub fn parse_time(text: &str) -> AppResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_time("empty time string"));
    }
    let normalized = trimmed.replace(',', ".");

    if let Some((minutes_part, seconds_part)) = normalized.split_once(':') {
        let minutes = parse_digit_run(minutes_part)
            .ok_or_else(|| AppError::invalid_time(format!("unparseable time '{trimmed}'")))?;
        let seconds = parse_seconds_part(seconds_part)
            .ok_or_else(|| AppError::invalid_time(format!("unparseable time '{trimmed}'")))?;
        if seconds >= 60.0 {
            return Err(AppError::invalid_time(format!(
                "seconds must be below 60 in '{trimmed}'"
            )));
        }
        Ok(minutes.mul_add(60.0, seconds))
    } else {
        parse_plain_seconds(&normalized)
            .ok_or_else(|| AppError::invalid_time(format!("unparseable time '{trimmed}'")))
    }
}

/// Parse a collection of split inputs all-or-nothing
///
/// # Errors
///
/// Returns the first conversion error encountered; no partially parsed
/// sequence is ever returned.
pub fn parse_splits<I, T>(values: I) -> AppResult<Vec<f64>>
where
    I: IntoIterator<Item = T>,
    T: Into<TimeValue>,
{
    values
        .into_iter()
        .map(|value| value.into().into_seconds())
        .collect()
}

/// Check that split times agree with the declared total
///
/// The sum of splits must be within `tolerance` seconds of `total`. Hand-timed
/// splits legitimately drift by a few hundredths; the default tolerance used
/// across the engine is [`crate::constants::defaults::SPLIT_TOLERANCE_SECONDS`].
///
/// # Errors
///
/// Returns an invalid-input error for a negative tolerance, an invalid-time
/// error for a negative total or split, and a splits-mismatch error when the
/// sum disagrees with the total beyond tolerance.
pub fn validate_splits(total: f64, splits: &[f64], tolerance: f64) -> AppResult<()> {
    if tolerance < 0.0 {
        return Err(AppError::invalid_input("tolerance must be non-negative"));
    }
    if total < 0.0 {
        return Err(AppError::invalid_time(format!("negative total {total}")));
    }
    if let Some(split) = splits.iter().find(|split| **split < 0.0) {
        return Err(AppError::invalid_time(format!("negative split {split}")));
    }
    let splits_sum: f64 = splits.iter().sum();
    if (splits_sum - total).abs() > tolerance {
        return Err(AppError::splits_mismatch(total, splits_sum));
    }
    Ok(())
}

/// Format seconds for display: `M:SS.ss` from one minute up, `SS.ss` below
///
/// `83.45` renders as `1:23.45`, `23.4` as `23.40`.
#[must_use]
pub fn format_seconds(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    let remainder = minutes.mul_add(-60.0, seconds);
    if minutes >= 1.0 {
        format!("{}:{remainder:05.2}", minutes as u64)
    } else {
        format!("{remainder:.2}")
    }
}

/// Standard segment lengths for a declared race distance, in meters
///
/// Sprints split into quarters (50m into 12.5s, 100m into 25s); 200m and up
/// split into 50m segments. Unrecognized distances fall back to one segment
/// covering the whole swim.
#[must_use]
pub fn default_segment_lengths(distance: u32) -> Vec<f64> {
    match distance {
        50 => vec![12.5; 4],
        100 => vec![25.0; 4],
        d if d >= 200 => vec![50.0; (d / 50) as usize],
        d => vec![f64::from(d)],
    }
}

/// A run of ASCII digits parsed as a whole number, `None` otherwise
fn parse_digit_run(text: &str) -> Option<f64> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Seconds-with-optional-fraction after the colon: 1-2 digits, then up to
/// 3 fraction digits
fn parse_seconds_part(text: &str) -> Option<f64> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };
    if int_part.is_empty() || int_part.len() > 2 || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut seconds = int_part.parse::<f64>().ok()?;
    if let Some(frac) = frac_part {
        if frac.is_empty() || frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = frac.parse::<f64>().ok()?;
        seconds += digits / 10f64.powi(frac.len() as i32);
    }
    Some(seconds)
}

/// Plain decimal seconds: digits with an optional single fraction part
fn parse_plain_seconds(text: &str) -> Option<f64> {
    let valid = match text.split_once('.') {
        Some((int_part, frac_part)) => {
            !int_part.is_empty()
                && !frac_part.is_empty()
                && int_part.bytes().all(|b| b.is_ascii_digit())
                && frac_part.bytes().all(|b| b.is_ascii_digit())
        }
        None => !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()),
    };
    if !valid {
        return None;
    }
    text.parse::<f64>().ok()
}
