// ABOUTME: Tests for least-squares trend fitting over chronological series
// ABOUTME: Covers slope, fit quality, improvement rate, and direction classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use streamline_analytics::trends::{TrendDirection, TrendSummary};

const EPSILON: f64 = 1e-9;

#[test]
fn test_short_series_has_flat_trend() {
    let summary = TrendSummary::from_values(&[]);
    assert_eq!(summary.sample_count, 0);
    assert!(summary.slope.abs() < EPSILON);
    assert!(summary.r_squared.abs() < EPSILON);
    assert!(summary.improvement_rate.abs() < EPSILON);
    assert_eq!(summary.direction(), TrendDirection::Stable);

    let summary = TrendSummary::from_values(&[28.5]);
    assert_eq!(summary.sample_count, 1);
    assert!(summary.slope.abs() < EPSILON);
}

#[test]
fn test_perfect_linear_improvement() {
    // One second faster per attempt: slope -1, perfect fit
    let summary = TrendSummary::from_values(&[10.0, 9.0, 8.0, 7.0]);
    assert_eq!(summary.sample_count, 4);
    assert!((summary.slope - (-1.0)).abs() < EPSILON);
    assert!((summary.intercept - 10.0).abs() < EPSILON);
    assert!((summary.r_squared - 1.0).abs() < EPSILON);
    assert!((summary.improvement_rate - 30.0).abs() < EPSILON);
    assert_eq!(summary.direction(), TrendDirection::Improving);
}

#[test]
fn test_perfect_linear_decline() {
    let summary = TrendSummary::from_values(&[7.0, 8.0, 9.0, 10.0]);
    assert!((summary.slope - 1.0).abs() < EPSILON);
    assert_eq!(summary.direction(), TrendDirection::Declining);
    // Slowing down reads as negative improvement
    let expected = (7.0 - 10.0) / 7.0 * 100.0;
    assert!((summary.improvement_rate - expected).abs() < EPSILON);
}

#[test]
fn test_constant_series_is_stable() {
    let summary = TrendSummary::from_values(&[8.0, 8.0, 8.0, 8.0]);
    assert!(summary.slope.abs() < EPSILON);
    assert!(summary.r_squared.abs() < EPSILON, "no variance, no fit");
    assert!(summary.improvement_rate.abs() < EPSILON);
    assert_eq!(summary.direction(), TrendDirection::Stable);
}

#[test]
fn test_noisy_improvement_still_detected() {
    let summary = TrendSummary::from_values(&[30.0, 29.8, 29.9, 29.5, 29.6, 29.2]);
    assert!(summary.slope < 0.0);
    assert_eq!(summary.direction(), TrendDirection::Improving);
    assert!(summary.improvement_rate > 0.0);
    // Real but noisy signal: good fit, not a perfect one
    assert!(summary.r_squared > 0.5);
    assert!(summary.r_squared < 1.0);
}

#[test]
fn test_zero_first_value_reports_no_improvement() {
    let summary = TrendSummary::from_values(&[0.0, 5.0]);
    assert!(summary.improvement_rate.abs() < EPSILON);
}

#[test]
fn test_direction_deadband() {
    assert_eq!(TrendDirection::from_slope(0.0), TrendDirection::Stable);
    assert_eq!(TrendDirection::from_slope(0.0005), TrendDirection::Stable);
    assert_eq!(TrendDirection::from_slope(-0.0005), TrendDirection::Stable);
    assert_eq!(TrendDirection::from_slope(-0.001), TrendDirection::Stable);
    assert_eq!(TrendDirection::from_slope(-0.01), TrendDirection::Improving);
    assert_eq!(TrendDirection::from_slope(0.01), TrendDirection::Declining);
}
