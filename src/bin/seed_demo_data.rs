// ABOUTME: Demo data seeder for the Streamline analytics engine
// ABOUTME: Generates a realistic training block of attempts for a demo squad
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! Demo data seeder for Streamline.
//!
//! Populates the results database with a training block for a small demo
//! squad: timed attempts with splits and turn measurements, improving week
//! over week so PRs, trends, and leaderboards all have something to show.
//!
//! Usage:
//! ```bash
//! # Seed with default settings (8 weeks of history)
//! cargo run --bin seed-demo-data
//!
//! # Seed a specific database
//! cargo run --bin seed-demo-data -- --database-url sqlite:./data/demo.db
//!
//! # Wipe existing results first
//! cargo run --bin seed-demo-data -- --reset
//!
//! # Verbose output
//! cargo run --bin seed-demo-data -- -v
//! ```

use std::env;
use std::fs;

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use streamline::config::environment::{DatabaseUrl, LogLevel};
use streamline::database::{Database, NewAttempt};
use streamline::logging::{LogFormat, LoggingConfig};
use streamline_analytics::turns::norms_for;
use streamline_core::models::{Period, Stroke, TurnPhases};
use streamline_core::time::{default_segment_lengths, format_seconds};

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Streamline Demo Data Seeder",
    long_about = "Populate the results database with a realistic training block for a demo squad"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// User ID recorded as the acting coach in the audit log
    #[arg(long, default_value = "1")]
    coach_id: i64,

    /// Number of days of historical data to generate
    #[arg(long, default_value = "56")]
    days: u32,

    /// Delete existing results before seeding
    #[arg(long)]
    reset: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Demo athlete configuration
struct DemoAthlete {
    name: &'static str,
    /// Freestyle pace per 100m at the start of the block, in seconds
    base_pace: f64,
    /// Fractional pace improvement per week of training
    improvement_per_week: f64,
    /// Events the athlete races in practice
    events: &'static [(Stroke, u32)],
}

/// Demo squad roster
const ROSTER: &[DemoAthlete] = &[
    DemoAthlete {
        name: "Maya Lindqvist",
        base_pace: 57.5,
        improvement_per_week: 0.004,
        events: &[(Stroke::Freestyle, 50), (Stroke::Freestyle, 100), (Stroke::Butterfly, 50)],
    },
    DemoAthlete {
        name: "Jonas Berg",
        base_pace: 54.0,
        improvement_per_week: 0.003,
        events: &[(Stroke::Freestyle, 50), (Stroke::Backstroke, 50), (Stroke::Freestyle, 200)],
    },
    DemoAthlete {
        name: "Sofia Almeida",
        base_pace: 59.0,
        improvement_per_week: 0.005,
        events: &[(Stroke::Breaststroke, 100), (Stroke::Breaststroke, 50), (Stroke::Freestyle, 100)],
    },
    DemoAthlete {
        name: "Elias Virtanen",
        base_pace: 55.5,
        improvement_per_week: 0.002,
        events: &[(Stroke::Butterfly, 100), (Stroke::Freestyle, 100)],
    },
    DemoAthlete {
        name: "Nora Kovacs",
        base_pace: 61.0,
        improvement_per_week: 0.006,
        events: &[(Stroke::Backstroke, 100), (Stroke::Freestyle, 50)],
    },
    DemoAthlete {
        name: "Tomas Novak",
        base_pace: 56.0,
        improvement_per_week: 0.003,
        events: &[(Stroke::Freestyle, 50), (Stroke::Butterfly, 50), (Stroke::Freestyle, 400)],
    },
    DemoAthlete {
        name: "Ingrid Dahl",
        base_pace: 58.0,
        improvement_per_week: 0.004,
        events: &[(Stroke::Freestyle, 100), (Stroke::Breaststroke, 50)],
    },
    DemoAthlete {
        name: "Lucas Meyer",
        base_pace: 60.5,
        improvement_per_week: 0.005,
        events: &[(Stroke::Backstroke, 50), (Stroke::Freestyle, 100)],
    },
];

/// Rough pace multiplier per stroke relative to freestyle
const fn stroke_factor(stroke: Stroke) -> f64 {
    match stroke {
        Stroke::Freestyle => 1.0,
        Stroke::Backstroke => 1.12,
        Stroke::Breaststroke => 1.27,
        Stroke::Butterfly => 1.08,
        Stroke::Medley => 1.15,
    }
}

/// Squad water sessions run Tuesday, Thursday, and Saturday
fn is_session_day(dt: DateTime<Utc>) -> bool {
    matches!(dt.weekday(), Weekday::Tue | Weekday::Thu | Weekday::Sat)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let logging = LoggingConfig {
        level: if args.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        },
        format: LogFormat::Compact,
        ..LoggingConfig::from_env()
    };
    logging.init()?;

    info!("=== Streamline Demo Data Seeder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:./data/streamline.db".into());

    // A file-backed SQLite URL needs its parent directory to exist
    if let DatabaseUrl::SQLite { path } = DatabaseUrl::parse_url(&database_url) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
    }

    info!("Connecting to database: {}", database_url);
    let database = Database::new(&database_url).await?;

    if args.reset {
        info!("Resetting result data...");
        reset_result_data(&database).await?;
    }

    info!("Seeding {} days of squad history...", args.days);
    let (attempts, prs) = seed_attempts(&database, args.days, args.coach_id).await?;
    info!("  Recorded {} attempts ({} PRs)", attempts, prs);

    info!("");
    info!("=== Seeding Complete ===");
    print_summary(&database).await?;

    Ok(())
}

/// Wipe result tables; the schema stays in place
async fn reset_result_data(database: &Database) -> Result<()> {
    for statement in [
        "DELETE FROM audit_log",
        "DELETE FROM turn_analysis",
        "DELETE FROM result_segments",
        "DELETE FROM results",
    ] {
        sqlx::query(statement).execute(database.pool()).await?;
    }
    Ok(())
}

/// Generate the training block, oldest session first so PR detection at
/// insert time sees history in chronological order
async fn seed_attempts(database: &Database, days: u32, coach_id: i64) -> Result<(u64, u64)> {
    let mut rng = StdRng::from_entropy();
    let mut attempts: u64 = 0;
    let mut prs: u64 = 0;

    for day_offset in (0..days).rev() {
        let day = Utc::now() - Duration::days(i64::from(day_offset));
        if !is_session_day(day) {
            continue;
        }
        let weeks_ago = f64::from(day_offset) / 7.0;

        for (index, athlete) in ROSTER.iter().enumerate() {
            let athlete_id = index as i64 + 1;

            for &(stroke, distance) in athlete.events {
                // Not every athlete races every event every session
                if !rng.gen_bool(0.6) {
                    continue;
                }

                let total_seconds = race_time(&mut rng, athlete, stroke, distance, weeks_ago);
                let splits = build_splits(total_seconds, distance);
                let turns = build_turns(&mut rng, stroke, splits.len());
                let timestamp = day
                    .with_hour(rng.gen_range(16..19))
                    .unwrap_or(day)
                    .with_minute(rng.gen_range(0..60))
                    .unwrap_or(day)
                    .with_second(rng.gen_range(0..60))
                    .unwrap_or(day);

                let attempt = NewAttempt {
                    athlete_id,
                    athlete_name: athlete.name.to_owned(),
                    stroke,
                    distance,
                    total_seconds,
                    splits,
                    turns,
                    timestamp,
                    recorded_by: coach_id,
                };

                let outcome = database.record_attempt(&attempt).await?;
                attempts += 1;
                if outcome.total.is_new {
                    prs += 1;
                    info!(
                        "  PR: {} {} {}m -> {}",
                        athlete.name,
                        stroke,
                        distance,
                        format_seconds(total_seconds)
                    );
                }
            }
        }
    }

    Ok((attempts, prs))
}

/// Race time that trends faster as the block progresses, with daily noise
fn race_time(
    rng: &mut StdRng,
    athlete: &DemoAthlete,
    stroke: Stroke,
    distance: u32,
    weeks_ago: f64,
) -> f64 {
    let base = athlete.base_pace * (f64::from(distance) / 100.0) * stroke_factor(stroke);
    let training_state = athlete.improvement_per_week.mul_add(weeks_ago, 1.0);
    let daily_variance: f64 = rng.gen_range(0.995..1.035);
    base * training_state * daily_variance
}

/// Split the total across the standard segment layout with a mild fatigue ramp
fn build_splits(total_seconds: f64, distance: u32) -> Vec<f64> {
    let lengths = default_segment_lengths(distance);
    let weights: Vec<f64> = lengths
        .iter()
        .enumerate()
        .map(|(i, length)| length * (i as f64).mul_add(0.015, 1.0))
        .collect();
    let weight_sum: f64 = weights.iter().sum();
    weights
        .iter()
        .map(|weight| total_seconds * weight / weight_sum)
        .collect()
}

/// Turn measurements scattered around the stroke norms
fn build_turns(rng: &mut StdRng, stroke: Stroke, segment_count: usize) -> Vec<TurnPhases> {
    let turn_count = segment_count.saturating_sub(1);
    let Ok(norms) = norms_for(stroke) else {
        return Vec::new();
    };

    (0..turn_count)
        .map(|_| TurnPhases {
            approach: norms.approach * rng.gen_range(0.92..1.25),
            wall_contact: norms.wall_contact * rng.gen_range(0.9..1.3),
            push_off: norms.push_off * rng.gen_range(0.9..1.25),
            underwater: norms.underwater * rng.gen_range(0.85..1.2),
        })
        .collect()
}

/// Print summary statistics
async fn print_summary(database: &Database) -> Result<()> {
    print_count(database, "Results", "SELECT COUNT(*) FROM results").await?;
    print_count(database, "Segments", "SELECT COUNT(*) FROM result_segments").await?;
    print_count(database, "Turns", "SELECT COUNT(*) FROM turn_analysis").await?;
    print_count(database, "Audit Entries", "SELECT COUNT(*) FROM audit_log").await?;

    let leaderboard = database.leaderboard(Period::Month, 10).await;
    if !leaderboard.is_empty() {
        info!("");
        info!("30-day PR leaderboard:");
        for entry in &leaderboard {
            info!(
                "  {} - {} PRs over {} swims",
                entry.name, entry.pr_count, entry.attempts
            );
        }
    }

    info!("");
    info!("Done! Point the service at this database to explore the demo squad.");
    Ok(())
}

/// Helper to print a single count query result
async fn print_count(database: &Database, label: &str, query: &str) -> Result<()> {
    let row: (i64,) = sqlx::query_as(query).fetch_one(database.pool()).await?;
    info!("{}: {}", label, row.0);
    Ok(())
}
