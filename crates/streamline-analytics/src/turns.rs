// ABOUTME: Turn efficiency scoring against stroke-specific reference norms
// ABOUTME: Four-phase ratio score with form-stroke penalties and coaching tips
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! # Turn Efficiency
//!
//! Scores one wall turn 0-100 against per-stroke reference norms for the four
//! phases (approach, wall contact, push-off, underwater). Each phase scores
//! `clamp(norm / actual, 0, 1)`; the mean is scaled to 100, breaststroke and
//! butterfly apply technique deductions, and the result clamps back into
//! `[0, 100]`.
//!
//! Callers can pass the stroke as deck shorthand (`"fly"`); normalization and
//! the unknown-stroke failure happen here so the scorer and the recommendation
//! generator reject bad names identically. Individual medley has no
//! single-stroke norm set and is rejected the same way.

use serde::{Deserialize, Serialize};
use tracing::debug;

use streamline_core::constants::{coaching, turn_norms, turn_penalties};
use streamline_core::errors::{AppError, AppResult};
use streamline_core::models::{Stroke, TurnPhases};

/// Reference phase durations for one stroke, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnNorms {
    /// Final approach into the wall
    pub approach: f64,
    /// Wall contact through the pivot or tumble
    pub wall_contact: f64,
    /// Push-off to full extension
    pub push_off: f64,
    /// Underwater phase to breakout
    pub underwater: f64,
}

impl TurnNorms {
    /// Norms in swim order, matching [`TurnPhases::as_array`]
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [
            self.approach,
            self.wall_contact,
            self.push_off,
            self.underwater,
        ]
    }
}

const FREESTYLE_NORMS: TurnNorms = TurnNorms {
    approach: turn_norms::freestyle::APPROACH_SECONDS,
    wall_contact: turn_norms::freestyle::WALL_CONTACT_SECONDS,
    push_off: turn_norms::freestyle::PUSH_OFF_SECONDS,
    underwater: turn_norms::freestyle::UNDERWATER_SECONDS,
};

const BACKSTROKE_NORMS: TurnNorms = TurnNorms {
    approach: turn_norms::backstroke::APPROACH_SECONDS,
    wall_contact: turn_norms::backstroke::WALL_CONTACT_SECONDS,
    push_off: turn_norms::backstroke::PUSH_OFF_SECONDS,
    underwater: turn_norms::backstroke::UNDERWATER_SECONDS,
};

const BREASTSTROKE_NORMS: TurnNorms = TurnNorms {
    approach: turn_norms::breaststroke::APPROACH_SECONDS,
    wall_contact: turn_norms::breaststroke::WALL_CONTACT_SECONDS,
    push_off: turn_norms::breaststroke::PUSH_OFF_SECONDS,
    underwater: turn_norms::breaststroke::UNDERWATER_SECONDS,
};

const BUTTERFLY_NORMS: TurnNorms = TurnNorms {
    approach: turn_norms::butterfly::APPROACH_SECONDS,
    wall_contact: turn_norms::butterfly::WALL_CONTACT_SECONDS,
    push_off: turn_norms::butterfly::PUSH_OFF_SECONDS,
    underwater: turn_norms::butterfly::UNDERWATER_SECONDS,
};

/// Complete assessment of one measured turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnAssessment {
    /// Stroke the turn was swum in
    pub stroke: Stroke,
    /// The four measured phase durations
    pub phases: TurnPhases,
    /// 0-100 efficiency score
    pub efficiency_score: f64,
    /// Coaching tips; never empty (an efficient turn gets a keep-it-up line)
    pub recommendations: Vec<String>,
}

/// Reference norms for a stroke
///
/// # Errors
///
/// Returns an invalid-input error for [`Stroke::Medley`]: medley turns mix
/// strokes and have no single norm set.
pub fn norms_for(stroke: Stroke) -> AppResult<TurnNorms> {
    match stroke {
        Stroke::Freestyle => Ok(FREESTYLE_NORMS),
        Stroke::Backstroke => Ok(BACKSTROKE_NORMS),
        Stroke::Breaststroke => Ok(BREASTSTROKE_NORMS),
        Stroke::Butterfly => Ok(BUTTERFLY_NORMS),
        Stroke::Medley => Err(AppError::invalid_input(
            "individual medley has no single-stroke turn norms",
        )),
    }
}

/// Score a turn from a stroke name or alias
///
/// # Errors
///
/// Returns an unknown-stroke error for unrecognized names and an
/// invalid-input error for medley.
pub fn efficiency_score(stroke: &str, phases: &TurnPhases) -> AppResult<f64> {
    efficiency_score_for(Stroke::parse_alias(stroke)?, phases)
}

/// Score a turn for an already-parsed stroke
///
/// A phase measured at zero or below scores zero for that phase rather than
/// erroring; timing gear drops phases often enough that a partial measurement
/// still deserves a score.
///
/// # Errors
///
/// Returns an invalid-input error for medley.
pub fn efficiency_score_for(stroke: Stroke, phases: &TurnPhases) -> AppResult<f64> {
    let norms = norms_for(stroke)?;

    let ratio_sum: f64 = norms
        .as_array()
        .iter()
        .zip(phases.as_array())
        .map(|(norm, actual)| {
            if actual > 0.0 {
                (norm / actual).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .sum();
    let mut score = ratio_sum / 4.0 * 100.0;

    let penalty = match stroke {
        Stroke::Breaststroke => breaststroke_penalty(phases),
        Stroke::Butterfly => butterfly_penalty(phases),
        _ => 0.0,
    };
    if penalty > 0.0 {
        debug!(stroke = %stroke, penalty, "technique deductions applied to turn score");
        score -= penalty;
    }

    Ok(round2(score.clamp(0.0, 100.0)))
}

/// Generate coaching tips from a stroke name or alias
///
/// # Errors
///
/// Same failure cases as [`efficiency_score`]; an unrecognized stroke fails
/// here exactly as it does in the scorer.
pub fn recommendations(stroke: &str, phases: &TurnPhases) -> AppResult<Vec<String>> {
    recommendations_for(Stroke::parse_alias(stroke)?, phases)
}

/// Generate coaching tips for an already-parsed stroke
///
/// Compares each phase against the stroke norm with the thresholds from
/// `streamline_core::constants::coaching`; form strokes get extra touch and
/// pullout checks. A turn with no findings gets a single keep-it-up line.
///
/// # Errors
///
/// Returns an invalid-input error for medley.
pub fn recommendations_for(stroke: Stroke, phases: &TurnPhases) -> AppResult<Vec<String>> {
    let norms = norms_for(stroke)?;
    let mut tips = Vec::new();

    if phases.approach > norms.approach * coaching::APPROACH_OVER_NORM_RATIO {
        tips.push("Hold speed into the wall instead of gliding the final stroke.".to_owned());
    }
    if phases.wall_contact > norms.wall_contact * coaching::WALL_CONTACT_OVER_NORM_RATIO {
        tips.push("Cut wall contact time; the pivot is running long.".to_owned());
    }
    if phases.push_off > norms.push_off * coaching::PUSH_OFF_OVER_NORM_RATIO {
        tips.push("Drive off the wall harder and hit the streamline sooner.".to_owned());
    }
    if phases.underwater < norms.underwater * coaching::UNDERWATER_UNDER_NORM_RATIO {
        tips.push("Stay underwater longer; you are surfacing early for this stroke.".to_owned());
    }

    match stroke {
        Stroke::Breaststroke => {
            if phases.wall_contact < coaching::breaststroke::QUICK_CONTACT_CUTOFF {
                tips.push(
                    "Make a deliberate two-hand touch before initiating the turn.".to_owned(),
                );
            }
            let low = coaching::breaststroke::UNDERWATER_BAND_LOW;
            let high = coaching::breaststroke::UNDERWATER_BAND_HIGH;
            if phases.underwater < low || phases.underwater > high {
                tips.push(format!(
                    "Time the pullout: glide, pull-down, and kick should settle in the \
                     {low:.1}-{high:.1}s band."
                ));
            }
        }
        Stroke::Butterfly => {
            if phases.wall_contact < coaching::butterfly::QUICK_CONTACT_CUTOFF {
                tips.push("Commit to the two-hand touch; the contact looks rushed.".to_owned());
            }
            if phases.underwater < coaching::butterfly::MIN_UNDERWATER {
                tips.push("Add underwater dolphin kicks before the breakout.".to_owned());
            }
        }
        _ => {}
    }

    if tips.is_empty() {
        tips.push("Turn executed efficiently, keep up the consistency.".to_owned());
    }
    Ok(tips)
}

/// Score and advise on a turn measured as a raw segment sequence
///
/// Takes the first four values as phase durations in swim order.
///
/// # Errors
///
/// Returns an invalid-input error when fewer than four durations are provided,
/// plus the failure cases of [`efficiency_score`].
pub fn analyze(stroke: &str, segment_times: &[f64]) -> AppResult<TurnAssessment> {
    let stroke = Stroke::parse_alias(stroke)?;
    let phases = TurnPhases::from_segments(segment_times)?;
    let efficiency_score = efficiency_score_for(stroke, &phases)?;
    let recommendations = recommendations_for(stroke, &phases)?;
    Ok(TurnAssessment {
        stroke,
        phases,
        efficiency_score,
        recommendations,
    })
}

fn breaststroke_penalty(phases: &TurnPhases) -> f64 {
    use turn_penalties::breaststroke as p;

    let mut penalty = 0.0;
    if phases.wall_contact < p::SHORT_CONTACT_CUTOFF {
        penalty += p::SHORT_CONTACT_PENALTY;
    } else if phases.wall_contact > p::LONG_CONTACT_CUTOFF {
        penalty += p::LONG_CONTACT_PENALTY;
    }
    if phases.underwater < p::UNDERWATER_LOW_CUTOFF || phases.underwater > p::UNDERWATER_HIGH_CUTOFF
    {
        penalty += p::UNDERWATER_PENALTY;
    }
    penalty
}

fn butterfly_penalty(phases: &TurnPhases) -> f64 {
    use turn_penalties::butterfly as p;

    let mut penalty = 0.0;
    if phases.wall_contact < p::SHORT_CONTACT_CUTOFF {
        penalty += p::SHORT_CONTACT_PENALTY;
    }
    if phases.underwater < p::UNDERWATER_LOW_CUTOFF {
        penalty += p::UNDERWATER_LOW_PENALTY;
    } else if phases.underwater > p::UNDERWATER_HIGH_CUTOFF {
        penalty += p::UNDERWATER_HIGH_PENALTY;
    }
    penalty
}

/// Round to two decimal places for stable display and comparison
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
