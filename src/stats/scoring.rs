//! Shot and session scoring.
//!
//! A shot starts at 100 and loses two points per yard of distance error and
//! one point per foot of lateral miss. Only the floor is clamped: a shot can
//! never score below zero, and the formula itself tops out at 100.
//!
//! A session scores the mean of its shots.

use serde::{Deserialize, Serialize};

use crate::core::Shot;
use crate::error::{FairwayError, Result};

/// Score thresholds for insight and band tiers.
pub mod thresholds {
    /// Scores strictly above this are high.
    pub const HIGH: f64 = 80.0;
    /// Scores strictly above this (and not high) are medium.
    pub const MEDIUM: f64 = 50.0;
}

/// Points lost per yard between actual and target distance.
pub const DISTANCE_PENALTY_PER_YARD: f64 = 2.0;
/// Points lost per foot of lateral miss.
pub const DEVIATION_PENALTY_PER_FOOT: f64 = 1.0;

/// Score a single shot against the distance it was aiming for.
pub fn shot_score(actual_distance: f64, target_distance: f64, deviation: f64) -> f64 {
    let distance_penalty = (actual_distance - target_distance).abs() * DISTANCE_PENALTY_PER_YARD;
    let deviation_penalty = deviation.abs() * DEVIATION_PENALTY_PER_FOOT;
    (100.0 - distance_penalty - deviation_penalty).max(0.0)
}

/// Score a session: the mean of each shot scored against its own target.
///
/// `shots` and `targets` are paired by index and must have equal length.
/// An empty session scores 0.
pub fn session_score(shots: &[Shot], targets: &[f64]) -> Result<f64> {
    if shots.len() != targets.len() {
        return Err(FairwayError::invalid_input(format!(
            "{} shots recorded for {} targets",
            shots.len(),
            targets.len()
        )));
    }

    if shots.is_empty() {
        return Ok(0.0);
    }

    let total: f64 = shots
        .iter()
        .zip(targets)
        .map(|(shot, target)| shot_score(shot.distance, *target, shot.deviation))
        .sum();

    Ok(total / shots.len() as f64)
}

/// Traffic-light band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score > thresholds::HIGH {
            ScoreBand::High
        } else if score > thresholds::MEDIUM {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    /// Insight text recorded with a session in this band.
    pub fn insight(self) -> &'static str {
        match self {
            ScoreBand::High => "Excellent performance!",
            ScoreBand::Medium => "Good, but room for improvement.",
            ScoreBand::Low => "Focus on accuracy and club selection.",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }
}

/// Insight text for a session score.
pub fn session_insight(score: f64) -> &'static str {
    ScoreBand::for_score(score).insight()
}
