// ABOUTME: Personal-record detection and Sum-of-Best aggregation
// ABOUTME: Strict less-than PR policy and the union-of-indices SoB construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! # Records
//!
//! Personal-record detection over total times and per-segment splits, plus the
//! Sum of Best (SoB): the fastest split ever seen for each segment index,
//! summed into a synthetic best-possible total. The SoB usually beats every
//! real attempt since its segments can come from different swims.
//!
//! Missing-history policy: an absent previous best is "no floor", never zero.
//! A first attempt is therefore always a PR, and a segment with no prior
//! observation counts as improved.

use serde::{Deserialize, Serialize};

use streamline_core::errors::{AppError, AppResult};

/// Outcome of comparing a new total time against the standing best
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalPr {
    /// Standing best before this attempt, if any
    pub previous: Option<f64>,
    /// The new attempt's total
    pub current: f64,
    /// Whether the attempt sets a new record (strict less-than; a tie does not)
    pub is_new: bool,
    /// Seconds taken off the standing best; `0.0` unless a record was broken
    pub delta: f64,
}

/// Sum-of-Best totals before and after folding in a new attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SumOfBest {
    /// SoB built from prior bests only; `None` when no segment had history
    pub previous: Option<f64>,
    /// SoB after folding in the new segments
    pub current: f64,
    /// Improvement in seconds, never negative by construction
    pub delta: f64,
}

/// Compare a new total against the standing best
///
/// `is_new` requires strictly beating the previous time; equaling it keeps the
/// old record. `delta` is the time taken off, and stays `0.0` for a first
/// attempt (nothing to take time off of) and for non-records.
///
/// # Errors
///
/// Returns an invalid-time error when either time is negative.
pub fn detect_total_pr(previous_best: Option<f64>, current_total: f64) -> AppResult<TotalPr> {
    if let Some(previous) = previous_best {
        reject_negative(previous)?;
    }
    reject_negative(current_total)?;

    let is_new = previous_best.is_none_or(|previous| current_total < previous);
    let delta = match previous_best {
        Some(previous) if is_new => previous - current_total,
        _ => 0.0,
    };
    Ok(TotalPr {
        previous: previous_best,
        current: current_total,
        is_new,
        delta,
    })
}

/// Per-segment record flags for a new attempt
///
/// One flag per new segment; a segment improves when no prior best exists for
/// its index (shorter history, or a `None` gap) or the new split is strictly
/// faster. Prior bests beyond the new attempt's length are ignored.
///
/// # Errors
///
/// Returns an invalid-time error when any time is negative.
pub fn detect_segment_prs(
    previous_bests: &[Option<f64>],
    new_segments: &[f64],
) -> AppResult<Vec<bool>> {
    for best in previous_bests.iter().flatten() {
        reject_negative(*best)?;
    }
    new_segments
        .iter()
        .enumerate()
        .map(|(index, new_split)| {
            reject_negative(*new_split)?;
            let improved = match previous_bests.get(index) {
                Some(Some(previous)) => *new_split < *previous,
                _ => true,
            };
            Ok(improved)
        })
        .collect()
}

/// Fold a new attempt's segments into the Sum of Best
///
/// Works over the union of indices from both sequences. Per index: both
/// present takes the minimum; one present keeps the lone value as that
/// segment's best; both absent contributes `0.0`. `previous` sums only the
/// non-null prior bests and is `None` when there were none. `delta` is
/// clamped at zero; folding in new observations can never worsen the SoB.
///
/// # Errors
///
/// Returns an invalid-time error when any present value is negative.
pub fn calc_sob(previous_bests: &[Option<f64>], new_segments: &[Option<f64>]) -> AppResult<SumOfBest> {
    for value in previous_bests.iter().chain(new_segments).flatten() {
        reject_negative(*value)?;
    }

    let count = previous_bests.len().max(new_segments.len());
    let mut current = 0.0;
    for index in 0..count {
        let previous = previous_bests.get(index).copied().flatten();
        let new = new_segments.get(index).copied().flatten();
        current += match (previous, new) {
            (Some(previous), Some(new)) => previous.min(new),
            (Some(previous), None) => previous,
            (None, Some(new)) => new,
            (None, None) => 0.0,
        };
    }

    let prior: Vec<f64> = previous_bests.iter().copied().flatten().collect();
    let previous = if prior.is_empty() {
        None
    } else {
        Some(prior.iter().sum())
    };
    let delta = previous.map_or(0.0, |previous: f64| (previous - current).max(0.0));

    Ok(SumOfBest {
        previous,
        current,
        delta,
    })
}

fn reject_negative(value: f64) -> AppResult<()> {
    if value < 0.0 {
        return Err(AppError::invalid_time(format!("negative time value {value}")));
    }
    Ok(())
}
