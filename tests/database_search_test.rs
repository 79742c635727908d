// ABOUTME: Integration tests for filtered, paginated result search
// ABOUTME: Covers each filter, page clamping, ordering, and the empty page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{Duration, Utc};

use streamline::database::{Database, NewAttempt, SearchFilters};
use streamline_core::errors::ErrorCode;
use streamline_core::models::Stroke;

mod common;
use common::*;

const EPSILON: f64 = 1e-9;

/// Seven swims: five freestyle 50s for athlete 1 (one of them over 100m),
/// one butterfly swim, and one swim by a teammate. Only the 31.5 is not a PR.
async fn seed_results(db: &Database) {
    db.record_attempt(&attempt_days_ago(1, 32.0, &[7.9, 8.0, 8.0, 8.1], 10))
        .await
        .expect("Failed to record attempt");
    db.record_attempt(&attempt_days_ago(1, 31.0, &[7.6, 7.8, 7.8, 7.8], 8))
        .await
        .expect("Failed to record attempt");
    db.record_attempt(&attempt_days_ago(1, 31.5, &[7.7, 7.9, 7.9, 8.0], 6))
        .await
        .expect("Failed to record attempt");
    db.record_attempt(&attempt_days_ago(1, 30.5, &[7.4, 7.6, 7.7, 7.8], 4))
        .await
        .expect("Failed to record attempt");
    db.record_attempt(&NewAttempt {
        stroke: Stroke::Butterfly,
        ..attempt_days_ago(1, 33.0, &[8.0, 8.3, 8.3, 8.4], 3)
    })
    .await
    .expect("Failed to record fly attempt");
    db.record_attempt(&attempt_days_ago(2, 29.9, &[7.3, 7.5, 7.5, 7.6], 2))
        .await
        .expect("Failed to record teammate attempt");
    db.record_attempt(&NewAttempt {
        distance: 100,
        ..attempt_days_ago(1, 62.0, &[15.2, 15.5, 15.6, 15.7], 1)
    })
    .await
    .expect("Failed to record 100m attempt");
}

#[tokio::test]
async fn test_search_without_filters() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    seed_results(&db).await;

    let page = db
        .search_results(&SearchFilters::default(), 1, 10)
        .await
        .expect("Failed to search");

    assert_eq!(page.total, 7);
    assert_eq!(page.page, 1);
    assert_eq!(page.pages, 1);

    // Newest first
    let totals: Vec<f64> = page.items.iter().map(|item| item.total_seconds).collect();
    assert_eq!(totals, vec![62.0, 29.9, 33.0, 30.5, 31.5, 31.0, 32.0]);

    let newest = &page.items[0];
    assert_eq!(newest.athlete_id, 1);
    assert_eq!(newest.athlete_name, "Athlete 1");
    assert_eq!(newest.stroke, Stroke::Freestyle);
    assert_eq!(newest.distance, 100);
    assert!(newest.is_pr);
    assert!((newest.total_seconds - 62.0).abs() < EPSILON);
}

#[tokio::test]
async fn test_search_filter_by_athlete() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    seed_results(&db).await;

    let filters = SearchFilters {
        athlete_id: Some(2),
        ..SearchFilters::default()
    };
    let page = db
        .search_results(&filters, 1, 10)
        .await
        .expect("Failed to search");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].athlete_id, 2);
}

#[tokio::test]
async fn test_search_filter_by_stroke_and_distance() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    seed_results(&db).await;

    let by_stroke = SearchFilters {
        stroke: Some(Stroke::Butterfly),
        ..SearchFilters::default()
    };
    let page = db
        .search_results(&by_stroke, 1, 10)
        .await
        .expect("Failed to search by stroke");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].stroke, Stroke::Butterfly);
    assert!((page.items[0].total_seconds - 33.0).abs() < EPSILON);

    let by_distance = SearchFilters {
        distance: Some(100),
        ..SearchFilters::default()
    };
    let page = db
        .search_results(&by_distance, 1, 10)
        .await
        .expect("Failed to search by distance");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].distance, 100);
}

#[tokio::test]
async fn test_search_filter_by_date_window() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    seed_results(&db).await;

    let since = SearchFilters {
        date_from: Some(Utc::now() - Duration::days(5)),
        ..SearchFilters::default()
    };
    let page = db
        .search_results(&since, 1, 10)
        .await
        .expect("Failed to search by date_from");
    assert_eq!(page.total, 4);

    let until = SearchFilters {
        date_to: Some(Utc::now() - Duration::days(5)),
        ..SearchFilters::default()
    };
    let page = db
        .search_results(&until, 1, 10)
        .await
        .expect("Failed to search by date_to");
    assert_eq!(page.total, 3);

    let between = SearchFilters {
        date_from: Some(Utc::now() - Duration::days(9)),
        date_to: Some(Utc::now() - Duration::days(5)),
        ..SearchFilters::default()
    };
    let page = db
        .search_results(&between, 1, 10)
        .await
        .expect("Failed to search by window");
    assert_eq!(page.total, 2);
    let totals: Vec<f64> = page.items.iter().map(|item| item.total_seconds).collect();
    assert_eq!(totals, vec![31.5, 31.0]);
}

#[tokio::test]
async fn test_search_only_prs() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    seed_results(&db).await;

    let filters = SearchFilters {
        only_pr: true,
        ..SearchFilters::default()
    };
    let page = db
        .search_results(&filters, 1, 10)
        .await
        .expect("Failed to search PRs");
    assert_eq!(page.total, 6);
    assert!(page.items.iter().all(|item| item.is_pr));

    let mine = SearchFilters {
        athlete_id: Some(1),
        only_pr: true,
        ..SearchFilters::default()
    };
    let page = db
        .search_results(&mine, 1, 10)
        .await
        .expect("Failed to search own PRs");
    assert_eq!(page.total, 5);
}

#[tokio::test]
async fn test_search_pagination_and_clamping() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    seed_results(&db).await;

    let filters = SearchFilters::default();
    let first = db
        .search_results(&filters, 1, 3)
        .await
        .expect("Failed to fetch first page");
    assert_eq!(first.total, 7);
    assert_eq!(first.pages, 3);
    assert_eq!(first.page, 1);
    assert_eq!(first.items.len(), 3);

    let second = db
        .search_results(&filters, 2, 3)
        .await
        .expect("Failed to fetch second page");
    assert_eq!(second.page, 2);
    assert_eq!(second.items.len(), 3);
    // Pages must not overlap
    assert!(second.items[0].timestamp < first.items[2].timestamp);

    let last = db
        .search_results(&filters, 3, 3)
        .await
        .expect("Failed to fetch last page");
    assert_eq!(last.items.len(), 1);
    assert!((last.items[0].total_seconds - 32.0).abs() < EPSILON);

    // Page 0 clamps to the first page, overshoot clamps to the last
    let clamped_low = db
        .search_results(&filters, 0, 3)
        .await
        .expect("Failed to fetch clamped page");
    assert_eq!(clamped_low.page, 1);
    assert_eq!(clamped_low.items, first.items);

    let clamped_high = db
        .search_results(&filters, 99, 3)
        .await
        .expect("Failed to fetch clamped page");
    assert_eq!(clamped_high.page, 3);
    assert_eq!(clamped_high.items, last.items);
}

#[tokio::test]
async fn test_search_rejects_zero_page_size() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    let err = db
        .search_results(&SearchFilters::default(), 1, 0)
        .await
        .expect_err("zero page size must be rejected");
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_search_empty_database() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    let page = db
        .search_results(&SearchFilters::default(), 1, 10)
        .await
        .expect("Failed to search");
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.page, 1);
    assert_eq!(page.pages, 1);
}
