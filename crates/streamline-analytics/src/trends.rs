// ABOUTME: Least-squares trend fitting for chronological performance series
// ABOUTME: Slope, fit quality, and first-vs-last improvement rate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! # Trends
//!
//! Linear trend over a chronological series of measurements, used for
//! turn-time progressions. The x axis is the observation index (attempt
//! order), so the slope reads as seconds gained or lost per attempt; for time
//! series a negative slope means the athlete is getting faster.
//!
//! A series needs two points to carry a trend. Shorter input is not an error
//! here: a first-session athlete simply has a flat summary with zeroed slope
//! and improvement, and callers render it as "no trend yet".

use serde::{Deserialize, Serialize};

/// Direction of a fitted trend over a time-like series (lower is better)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Times are falling
    Improving,
    /// No meaningful movement either way
    Stable,
    /// Times are rising
    Declining,
}

impl TrendDirection {
    /// Classify a slope, with a small deadband treated as stable
    #[must_use]
    pub fn from_slope(slope: f64) -> Self {
        const DEADBAND: f64 = 1e-3;
        if slope < -DEADBAND {
            Self::Improving
        } else if slope > DEADBAND {
            Self::Declining
        } else {
            Self::Stable
        }
    }
}

/// Fitted trend over one chronological series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Least-squares slope in value units per observation
    pub slope: f64,
    /// Y-intercept of the fitted line
    pub intercept: f64,
    /// Coefficient of determination of the fit, 0-1
    pub r_squared: f64,
    /// First-vs-last change as a percentage of the first value
    pub improvement_rate: f64,
    /// Number of observations the fit was computed over
    pub sample_count: usize,
}

impl TrendSummary {
    /// Fit a trend over values in chronological order
    ///
    /// Fewer than two values yields the flat summary (all zeros) rather than
    /// an error; the improvement rate uses the first and last values and
    /// reports `0.0` when the first value is zero.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let sample_count = values.len();
        if sample_count < 2 {
            return Self::flat(sample_count);
        }

        let n = sample_count as f64;
        let sum_x: f64 = (0..sample_count).map(|i| i as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_xx: f64 = (0..sample_count).map(|i| (i * i) as f64).sum();
        let sum_xy: f64 = values
            .iter()
            .enumerate()
            .map(|(i, value)| i as f64 * value)
            .sum();
        let sum_yy: f64 = values.iter().map(|value| value * value).sum();

        let mean_x = sum_x / n;
        let mean_y = sum_y / n;

        let denominator = (n * mean_x).mul_add(-mean_x, sum_xx);
        if denominator.abs() < f64::EPSILON {
            return Self::flat(sample_count);
        }

        let slope = (n * mean_x).mul_add(-mean_y, sum_xy) / denominator;
        let intercept = slope.mul_add(-mean_x, mean_y);

        let numerator = (n * mean_x).mul_add(-mean_y, sum_xy);
        let denominator_corr =
            ((n * mean_x).mul_add(-mean_x, sum_xx) * (n * mean_y).mul_add(-mean_y, sum_yy)).sqrt();
        let correlation = if denominator_corr == 0.0 {
            0.0
        } else {
            numerator / denominator_corr
        };

        Self {
            slope,
            intercept,
            r_squared: correlation * correlation,
            improvement_rate: improvement_rate(values),
            sample_count,
        }
    }

    /// Direction classification of this trend
    #[must_use]
    pub fn direction(&self) -> TrendDirection {
        TrendDirection::from_slope(self.slope)
    }

    fn flat(sample_count: usize) -> Self {
        Self {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
            improvement_rate: 0.0,
            sample_count,
        }
    }
}

/// First-vs-last percentage change; positive when the series got faster
fn improvement_rate(values: &[f64]) -> f64 {
    let (Some(first), Some(last)) = (values.first(), values.last()) else {
        return 0.0;
    };
    if *first == 0.0 {
        return 0.0;
    }
    (first - last) / first * 100.0
}
