//! Per-club statistics across every recorded session.
//!
//! Shots are bucketed by club name in a single pass, each bucket is reduced
//! to a [`ClubStats`] row, and rows are ordered by descending average
//! distance. Clubs with no shots never appear.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::club::abbreviation;
use crate::core::{Session, Shot};

/// Points lost per foot of average lateral miss.
pub const DISPERSION_PENALTY_PER_FOOT: f64 = 2.0;
/// Divisor applied to the distance spread (max - min) in yards.
pub const SPREAD_DIVISOR: f64 = 2.0;

/// Aggregate numbers for one club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubStats {
    pub club: String,
    pub abbreviation: String,
    pub shot_count: usize,
    pub avg_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Signed mean deviation (negative = left).
    pub avg_deviation: f64,
    /// Consistency score in `[0, 100]`.
    pub score: f64,
}

impl ClubStats {
    /// Reduce a non-empty group of shots for one club.
    fn from_shots(club: &str, shots: &[&Shot]) -> Option<Self> {
        if shots.is_empty() {
            return None;
        }

        let count = shots.len() as f64;
        let avg_distance = shots.iter().map(|s| s.distance).sum::<f64>() / count;
        let avg_deviation = shots.iter().map(|s| s.deviation).sum::<f64>() / count;
        let min_distance = shots
            .iter()
            .map(|s| s.distance)
            .fold(f64::INFINITY, f64::min);
        let max_distance = shots
            .iter()
            .map(|s| s.distance)
            .fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            club: club.to_string(),
            abbreviation: abbreviation(club),
            shot_count: shots.len(),
            avg_distance,
            min_distance,
            max_distance,
            avg_deviation,
            score: consistency_score(avg_deviation, min_distance, max_distance),
        })
    }

    /// Average miss as a magnitude plus side, e.g. `"4 L"` or `"0 R"`.
    pub fn deviation_label(&self) -> String {
        let side = if self.avg_deviation < 0.0 { "L" } else { "R" };
        format!("{:.0} {}", self.avg_deviation.abs(), side)
    }
}

/// Consistency score from average miss and distance spread, clamped to `[0, 100]`.
pub fn consistency_score(avg_deviation: f64, min_distance: f64, max_distance: f64) -> f64 {
    let dispersion_penalty = avg_deviation.abs() * DISPERSION_PENALTY_PER_FOOT;
    let spread_penalty = (max_distance - min_distance) / SPREAD_DIVISOR;
    (100.0 - dispersion_penalty - spread_penalty).clamp(0.0, 100.0)
}

/// Build the per-club report for a session history.
///
/// Rows are sorted by descending average distance. Equal averages keep
/// club-name order, so identical input always yields identical output.
pub fn club_report(sessions: &[Session]) -> Vec<ClubStats> {
    let mut groups: BTreeMap<&str, Vec<&Shot>> = BTreeMap::new();
    for shot in sessions.iter().flat_map(|s| s.shots()) {
        groups.entry(shot.club.as_str()).or_default().push(shot);
    }

    let mut report: Vec<ClubStats> = groups
        .iter()
        .filter_map(|(club, shots)| ClubStats::from_shots(club, shots))
        .collect();

    report.sort_by(|a, b| {
        b.avg_distance
            .partial_cmp(&a.avg_distance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    report
}
