// ABOUTME: Reference norms and analytic thresholds for sprint analytics
// ABOUTME: Turn phase norms per stroke, penalty bands, coaching cutoffs, defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Streamline Swim Analytics

//! Reference values used throughout the analytics engine
//!
//! Turn phase norms approximate elite short-course execution and are the
//! anchor for the 0-100 efficiency score. They are coaching heuristics, not
//! regulatory limits; rule enforcement stays with officials.
//!
//! References:
//! - Maglischo, E.W. (2003). Swimming Fastest, Part III: Starts, Turns, and Finishes
//! - Blanksby, B.A. et al. (1996). Biomechanical analysis of freestyle tumble turns

/// Reference turn phase durations per stroke, in seconds
///
/// Four phases per turn: approach into the wall, wall contact, push-off,
/// underwater travel to breakout.
pub mod turn_norms {
    /// Freestyle tumble turn
    pub mod freestyle {
        /// Final approach into the wall
        pub const APPROACH_SECONDS: f64 = 3.4;
        /// Feet-on-wall contact during the tumble
        pub const WALL_CONTACT_SECONDS: f64 = 0.55;
        /// Push-off to full extension
        pub const PUSH_OFF_SECONDS: f64 = 0.75;
        /// Underwater streamline and kick to breakout
        pub const UNDERWATER_SECONDS: f64 = 3.6;
    }

    /// Backstroke turn (rollover into a freestyle-style tumble)
    pub mod backstroke {
        /// Final approach including the rollover
        pub const APPROACH_SECONDS: f64 = 3.7;
        /// Feet-on-wall contact
        pub const WALL_CONTACT_SECONDS: f64 = 0.6;
        /// Push-off to full extension
        pub const PUSH_OFF_SECONDS: f64 = 0.8;
        /// Underwater dolphin kick to breakout
        pub const UNDERWATER_SECONDS: f64 = 3.8;
    }

    /// Breaststroke open turn with two-hand touch
    pub mod breaststroke {
        /// Final approach into the two-hand touch
        pub const APPROACH_SECONDS: f64 = 3.9;
        /// Hand contact through the pivot
        pub const WALL_CONTACT_SECONDS: f64 = 0.75;
        /// Push-off to full extension
        pub const PUSH_OFF_SECONDS: f64 = 0.95;
        /// Pullout: glide, pull-down, kick to breakout
        pub const UNDERWATER_SECONDS: f64 = 3.0;
    }

    /// Butterfly open turn with two-hand touch
    pub mod butterfly {
        /// Final approach into the two-hand touch
        pub const APPROACH_SECONDS: f64 = 3.6;
        /// Hand contact through the pivot
        pub const WALL_CONTACT_SECONDS: f64 = 0.65;
        /// Push-off to full extension
        pub const PUSH_OFF_SECONDS: f64 = 0.85;
        /// Underwater dolphin kick to breakout
        pub const UNDERWATER_SECONDS: f64 = 4.1;
    }
}

/// Score deductions for technique red flags on form-stroke turns
///
/// Applied after the phase-ratio score; a flag costs a fixed number of points
/// off the 0-100 scale.
pub mod turn_penalties {
    /// Breaststroke deductions
    pub mod breaststroke {
        /// Wall contact below this suggests a rushed or missed two-hand touch
        pub const SHORT_CONTACT_CUTOFF: f64 = 0.55;
        /// Points deducted for a too-short contact
        pub const SHORT_CONTACT_PENALTY: f64 = 8.0;
        /// Wall contact above this means the swimmer stalled on the wall
        pub const LONG_CONTACT_CUTOFF: f64 = 0.9;
        /// Points deducted for a too-long contact
        pub const LONG_CONTACT_PENALTY: f64 = 5.0;
        /// Pullout shorter than this wastes the push-off glide
        pub const UNDERWATER_LOW_CUTOFF: f64 = 2.0;
        /// Pullout longer than this overstays the glide and dies on the breakout
        pub const UNDERWATER_HIGH_CUTOFF: f64 = 3.8;
        /// Points deducted for a pullout outside the band
        pub const UNDERWATER_PENALTY: f64 = 7.0;
    }

    /// Butterfly deductions
    pub mod butterfly {
        /// Wall contact below this suggests a one-hand or missed touch
        pub const SHORT_CONTACT_CUTOFF: f64 = 0.45;
        /// Points deducted for a too-short contact
        pub const SHORT_CONTACT_PENALTY: f64 = 6.0;
        /// Underwater shorter than this leaves dolphin kick speed unused
        pub const UNDERWATER_LOW_CUTOFF: f64 = 3.0;
        /// Points deducted for surfacing early
        pub const UNDERWATER_LOW_PENALTY: f64 = 6.0;
        /// Underwater longer than this drifts past the kick's useful range
        pub const UNDERWATER_HIGH_CUTOFF: f64 = 4.6;
        /// Points deducted for overstaying the underwater phase
        pub const UNDERWATER_HIGH_PENALTY: f64 = 4.0;
    }
}

/// Thresholds that trigger coaching recommendations
///
/// Ratios compare the measured phase duration to the stroke norm.
pub mod coaching {
    /// Approach slower than norm by this ratio triggers the approach-speed tip
    pub const APPROACH_OVER_NORM_RATIO: f64 = 1.1;
    /// Wall contact over norm by this ratio triggers the faster-hands tip
    pub const WALL_CONTACT_OVER_NORM_RATIO: f64 = 1.2;
    /// Push-off over norm by this ratio triggers the leg-drive tip
    pub const PUSH_OFF_OVER_NORM_RATIO: f64 = 1.15;
    /// Underwater below norm by this ratio triggers the streamline tip
    pub const UNDERWATER_UNDER_NORM_RATIO: f64 = 0.8;

    /// Breaststroke-specific cutoffs
    pub mod breaststroke {
        /// Contact below this prompts a deliberate two-hand-touch reminder
        pub const QUICK_CONTACT_CUTOFF: f64 = 0.6;
        /// Expected pullout duration band, low end
        pub const UNDERWATER_BAND_LOW: f64 = 2.2;
        /// Expected pullout duration band, high end
        pub const UNDERWATER_BAND_HIGH: f64 = 3.6;
    }

    /// Butterfly-specific cutoffs
    pub mod butterfly {
        /// Contact below this prompts a two-hand-touch reminder
        pub const QUICK_CONTACT_CUTOFF: f64 = 0.5;
        /// Underwater below this prompts a dolphin-kick-count tip
        pub const MIN_UNDERWATER: f64 = 3.2;
    }
}

/// Defaults shared by the storage layer, configuration, and binaries
pub mod defaults {
    /// Allowed drift between a hand-entered total and the sum of its splits
    pub const SPLIT_TOLERANCE_SECONDS: f64 = 0.20;
    /// Leaderboard row cap
    pub const LEADERBOARD_LIMIT: u32 = 10;
    /// Result-search page size
    pub const SEARCH_PAGE_SIZE: u32 = 10;
    /// Highlights shown in the weekly progress summary
    pub const WEEKLY_HIGHLIGHT_LIMIT: u32 = 3;
    /// Audit entries returned per entity query
    pub const AUDIT_ENTRY_LIMIT: u32 = 20;
}
