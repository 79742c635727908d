// ABOUTME: Integration tests for team statistics: leaderboard and weekly progress
// ABOUTME: Exercises window filtering, ranking order, name fallback, and highlight caps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use streamline::database::NewAttempt;
use streamline_core::models::{Period, Stroke};

mod common;
use common::*;

const EPSILON: f64 = 1e-9;

#[tokio::test]
async fn test_leaderboard_ranks_by_pr_count() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    // Athlete 1: two PRs and one slower swim inside the week
    db.record_attempt(&attempt_days_ago(1, 31.0, &[7.6, 7.7, 7.8, 7.9], 6))
        .await
        .expect("Failed to record");
    db.record_attempt(&attempt_days_ago(1, 30.5, &[7.4, 7.6, 7.7, 7.8], 4))
        .await
        .expect("Failed to record");
    db.record_attempt(&attempt_days_ago(1, 30.8, &[7.5, 7.6, 7.8, 7.9], 2))
        .await
        .expect("Failed to record");

    // Athlete 2: one PR
    db.record_attempt(&attempt_days_ago(2, 29.5, &[7.2, 7.3, 7.4, 7.6], 3))
        .await
        .expect("Failed to record");

    // Athlete 3: PR outside the window, only a non-PR inside it
    db.record_attempt(&attempt_days_ago(3, 30.0, &[7.3, 7.5, 7.6, 7.6], 10))
        .await
        .expect("Failed to record");
    db.record_attempt(&attempt_days_ago(3, 31.5, &[7.7, 7.8, 7.9, 8.1], 1))
        .await
        .expect("Failed to record");

    let entries = db.leaderboard(Period::Week, 10).await;
    assert_eq!(entries.len(), 2, "athletes without window PRs are dropped");

    assert_eq!(entries[0].athlete_id, 1);
    assert_eq!(entries[0].name, "Athlete 1");
    assert_eq!(entries[0].pr_count, 2);
    assert_eq!(entries[0].attempts, 3);

    assert_eq!(entries[1].athlete_id, 2);
    assert_eq!(entries[1].pr_count, 1);
    assert_eq!(entries[1].attempts, 1);
}

#[tokio::test]
async fn test_leaderboard_tiebreaks() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    let named = |athlete_id: i64, name: &str, total: f64, days: i64| NewAttempt {
        athlete_name: name.to_owned(),
        ..attempt_days_ago(athlete_id, total, &[], days)
    };

    // zoe: one PR and a follow-up swim; adam and Ben: one PR each
    db.record_attempt(&named(1, "zoe", 31.0, 5))
        .await
        .expect("Failed to record");
    db.record_attempt(&named(1, "zoe", 31.4, 2))
        .await
        .expect("Failed to record");
    db.record_attempt(&named(2, "Ben", 30.0, 3))
        .await
        .expect("Failed to record");
    db.record_attempt(&named(3, "adam", 32.0, 3))
        .await
        .expect("Failed to record");

    let entries = db.leaderboard(Period::Week, 10).await;
    let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
    // Equal PR counts: more attempts first, then case-insensitive name
    assert_eq!(names, vec!["zoe", "adam", "Ben"]);
}

#[tokio::test]
async fn test_leaderboard_name_fallback() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    db.record_attempt(&NewAttempt {
        athlete_name: String::new(),
        ..attempt_days_ago(42, 30.0, &[], 2)
    })
    .await
    .expect("Failed to record");
    db.record_attempt(&NewAttempt {
        athlete_name: "   ".to_owned(),
        ..attempt_days_ago(43, 31.0, &[], 2)
    })
    .await
    .expect("Failed to record");

    let entries = db.leaderboard(Period::Week, 10).await;
    let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert!(names.contains(&"ID 42"));
    assert!(names.contains(&"ID 43"), "blank names fall back too");
}

#[tokio::test]
async fn test_leaderboard_respects_limit_and_window() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    for athlete_id in 1..=3 {
        db.record_attempt(&attempt_days_ago(athlete_id, 30.0, &[], 2))
            .await
            .expect("Failed to record");
    }
    let entries = db.leaderboard(Period::Week, 2).await;
    assert_eq!(entries.len(), 2);

    // A PR ten days back is outside the week but inside the month
    db.record_attempt(&attempt_days_ago(9, 28.0, &[], 10))
        .await
        .expect("Failed to record");
    let week = db.leaderboard(Period::Week, 10).await;
    assert!(week.iter().all(|entry| entry.athlete_id != 9));
    let month = db.leaderboard(Period::Month, 10).await;
    assert!(month.iter().any(|entry| entry.athlete_id == 9));
}

#[tokio::test]
async fn test_leaderboard_empty_database() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let entries = db.leaderboard(Period::Week, 10).await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_weekly_progress_counts_and_highlights() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    // Older history outside the window
    db.record_attempt(&attempt_days_ago(1, 32.0, &[], 10))
        .await
        .expect("Failed to record");
    // Window swims: two freestyle PRs, a first-fly PR, one slower swim
    db.record_attempt(&attempt_days_ago(1, 31.0, &[], 6))
        .await
        .expect("Failed to record");
    let fastest = db
        .record_attempt(&attempt_days_ago(1, 30.5, &[], 3))
        .await
        .expect("Failed to record");
    db.record_attempt(&NewAttempt {
        stroke: Stroke::Butterfly,
        ..attempt_days_ago(1, 33.0, &[], 2)
    })
    .await
    .expect("Failed to record");
    db.record_attempt(&attempt_days_ago(1, 30.8, &[], 1))
        .await
        .expect("Failed to record");
    // Another athlete's swims stay out of the summary
    db.record_attempt(&attempt_days_ago(2, 29.0, &[], 1))
        .await
        .expect("Failed to record");

    let progress = db.weekly_progress(1).await;
    assert_eq!(progress.attempts, 4);
    assert_eq!(progress.prs, 3);

    // PRs first, fastest among them leading
    assert_eq!(progress.highlights.len(), 3);
    assert_eq!(progress.highlights[0].result_id, fastest.result_id);
    assert!((progress.highlights[0].total_seconds - 30.5).abs() < EPSILON);
    assert!(progress.highlights.iter().all(|highlight| highlight.is_pr));
    assert_eq!(progress.highlights[2].stroke, Stroke::Butterfly);
}

#[tokio::test]
async fn test_weekly_progress_empty_history() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    let progress = db.weekly_progress(1).await;
    assert_eq!(progress.attempts, 0);
    assert_eq!(progress.prs, 0);
    assert!(progress.highlights.is_empty());
}

#[tokio::test]
async fn test_weekly_progress_highlight_cap() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    // Four improving swims: every one a PR, only three highlight slots
    for (days, total) in [(6, 31.0), (4, 30.8), (3, 30.6), (1, 30.4)] {
        db.record_attempt(&attempt_days_ago(1, total, &[], days))
            .await
            .expect("Failed to record");
    }

    let progress = db.weekly_progress(1).await;
    assert_eq!(progress.attempts, 4);
    assert_eq!(progress.prs, 4);
    assert_eq!(progress.highlights.len(), 3);
    assert!((progress.highlights[0].total_seconds - 30.4).abs() < EPSILON);
    assert!((progress.highlights[2].total_seconds - 30.8).abs() < EPSILON);
}
