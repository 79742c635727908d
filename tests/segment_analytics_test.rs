// ABOUTME: Tests for segment analytics: speeds, average speed, pace, degradation
// ABOUTME: Covers uniform and per-segment lengths plus the zero-split policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use streamline_analytics::splits::{
    avg_speed, degradation_percent, pace_per_100, segment_speeds, SegmentLengths,
};
use streamline_core::errors::ErrorCode;

const EPSILON: f64 = 1e-9;

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (index, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < EPSILON, "index {index}: {a} vs {e}");
    }
}

#[test]
fn test_segment_speeds_uniform_lengths() {
    let speeds = segment_speeds(&[10.0, 12.5], 12.5).expect("Failed to compute speeds");
    assert_close(&speeds, &[1.25, 1.0]);
}

#[test]
fn test_segment_speeds_per_segment_lengths() {
    let speeds = segment_speeds(&[10.0, 20.0], vec![25.0, 50.0]).expect("Failed to compute");
    assert_close(&speeds, &[2.5, 2.5]);
}

#[test]
fn test_segment_speeds_zero_split_yields_zero() {
    // A dropped hand time must not abort the attempt
    let speeds = segment_speeds(&[0.0, 10.0], 12.5).expect("Failed to compute");
    assert_close(&speeds, &[0.0, 1.25]);
}

#[test]
fn test_segment_speeds_rejects_bad_input() {
    let err = segment_speeds(&[10.0, -1.0], 12.5).expect_err("negative split must fail");
    assert_eq!(err.code, ErrorCode::InvalidTimeFormat);

    let err = segment_speeds(&[10.0, 12.0], 0.0).expect_err("zero length must fail");
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err = segment_speeds(&[10.0, 12.0], vec![25.0]).expect_err("count mismatch must fail");
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err =
        segment_speeds(&[10.0, 12.0], vec![25.0, -5.0]).expect_err("negative length must fail");
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_avg_speed() {
    let speed = avg_speed(&[14.0, 14.5, 15.0, 14.8], 50.0).expect("Failed to compute avg speed");
    assert!((speed - 50.0 / 58.3).abs() < EPSILON);

    // Zero elapsed time reports zero speed instead of dividing
    let speed = avg_speed(&[0.0, 0.0], 50.0).expect("Failed to compute");
    assert!(speed.abs() < EPSILON);
    let speed = avg_speed(&[], 50.0).expect("Failed to compute with no splits");
    assert!(speed.abs() < EPSILON);
}

#[test]
fn test_avg_speed_rejects_bad_input() {
    let err = avg_speed(&[14.0], 0.0).expect_err("zero distance must fail");
    assert_eq!(err.code, ErrorCode::InvalidInput);
    let err = avg_speed(&[14.0], -50.0).expect_err("negative distance must fail");
    assert_eq!(err.code, ErrorCode::InvalidInput);
    let err = avg_speed(&[-14.0], 50.0).expect_err("negative split must fail");
    assert_eq!(err.code, ErrorCode::InvalidTimeFormat);
}

#[test]
fn test_pace_per_100() {
    let paces = pace_per_100(&[30.0, 32.0], 25.0).expect("Failed to compute pace");
    assert_close(&paces, &[120.0, 128.0]);

    let paces = pace_per_100(&[15.0, 31.0], vec![12.5, 25.0]).expect("Failed to compute");
    assert_close(&paces, &[120.0, 124.0]);
}

#[test]
fn test_pace_per_100_rejects_bad_lengths() {
    let err = pace_per_100(&[30.0], 0.0).expect_err("zero length must fail");
    assert_eq!(err.code, ErrorCode::InvalidInput);
    let err = pace_per_100(&[30.0, 32.0], vec![25.0, 25.0, 25.0]).expect_err("count mismatch");
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_degradation_percent_slowing_swim() {
    // 30s then 32s over 25m segments: last speed is 30/32 of the first
    let degradation = degradation_percent(&[30.0, 32.0], 25.0).expect("Failed to compute");
    assert!((degradation - 6.25).abs() < EPSILON);
}

#[test]
fn test_degradation_percent_floors_at_zero() {
    // Negative-split swims (speeding up) report zero degradation
    let degradation = degradation_percent(&[32.0, 30.0], 25.0).expect("Failed to compute");
    assert!(degradation.abs() < EPSILON);
}

#[test]
fn test_degradation_percent_trivial_cases() {
    let degradation = degradation_percent(&[30.0], 25.0).expect("single split");
    assert!(degradation.abs() < EPSILON);

    let degradation =
        degradation_percent(&[], SegmentLengths::PerSegment(Vec::new())).expect("no splits");
    assert!(degradation.abs() < EPSILON);

    // First segment with no measurable speed cannot anchor a ratio
    let degradation = degradation_percent(&[0.0, 30.0], 25.0).expect("zero first split");
    assert!(degradation.abs() < EPSILON);
}

#[test]
fn test_degradation_percent_still_validates_input() {
    let err = degradation_percent(&[-1.0], 25.0).expect_err("negative split must fail");
    assert_eq!(err.code, ErrorCode::InvalidTimeFormat);
}

#[test]
fn test_segment_lengths_resolve() {
    let lengths = SegmentLengths::Uniform(12.5)
        .resolve(4)
        .expect("Failed to resolve uniform");
    assert_close(&lengths, &[12.5, 12.5, 12.5, 12.5]);

    let lengths = SegmentLengths::PerSegment(vec![12.5, 25.0])
        .resolve(2)
        .expect("Failed to resolve per-segment");
    assert_close(&lengths, &[12.5, 25.0]);

    let err = SegmentLengths::PerSegment(vec![12.5])
        .resolve(2)
        .expect_err("count mismatch must fail");
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_segment_lengths_from_impls() {
    assert_eq!(SegmentLengths::from(12.5), SegmentLengths::Uniform(12.5));
    assert_eq!(
        SegmentLengths::from(vec![12.5, 25.0]),
        SegmentLengths::PerSegment(vec![12.5, 25.0])
    );
    let slice: &[f64] = &[50.0, 50.0];
    assert_eq!(
        SegmentLengths::from(slice),
        SegmentLengths::PerSegment(vec![50.0, 50.0])
    );
}
