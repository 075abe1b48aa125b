//! Clubs command for Fairway.
//!
//! Per-club distance and consistency table across every recorded shot.

use serde::{Deserialize, Serialize};

use crate::core::AppState;
use crate::stats::{club_report, ClubStats, ScoreBand};
use crate::storage::KeyValueStore;

/// Options for the clubs command.
#[derive(Debug, Clone, Default)]
pub struct ClubsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the clubs command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubsOutput {
    /// Whether stats were computed.
    pub success: bool,
    /// One row per club with shots, longest first.
    pub clubs: Vec<ClubStats>,
}

/// The clubs command implementation.
pub struct ClubsCommand<S: KeyValueStore> {
    state: AppState<S>,
}

impl<S: KeyValueStore> ClubsCommand<S> {
    /// Create a new clubs command.
    pub fn new(store: S) -> Self {
        Self {
            state: AppState::load(store),
        }
    }

    /// Run the clubs command.
    pub fn run(&self) -> ClubsOutput {
        ClubsOutput {
            success: true,
            clubs: club_report(&self.state.sessions()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ClubsOutput, options: &ClubsOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &ClubsOutput) -> String {
        if output.clubs.is_empty() {
            return "No shots recorded yet.".to_string();
        }

        let mut lines = Vec::new();
        lines.push(format!(
            "{:<4} {:>6} {:>6} {:>6} {:>6} {:>6}  {}",
            "Club", "Avg", "Min", "Max", "Dev", "Score", "Shots"
        ));
        for club in &output.clubs {
            lines.push(format!(
                "{:<4} {:>6.0} {:>6.0} {:>6.0} {:>6} {:>6.0}  {} ({})",
                club.abbreviation,
                club.avg_distance,
                club.min_distance,
                club.max_distance,
                club.deviation_label(),
                club.score,
                club.shot_count,
                ScoreBand::for_score(club.score).display_name()
            ));
        }

        lines.join("\n")
    }
}
