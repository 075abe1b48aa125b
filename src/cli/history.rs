//! History command for Fairway.
//!
//! Shows recorded sessions with the recent-form trend and coaching summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AppState, Session};
use crate::stats::{HistoryReport, ScoreBand};
use crate::storage::KeyValueStore;

/// Options for the history command.
#[derive(Debug, Clone, Default)]
pub struct HistoryOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Maximum number of sessions to list, newest first.
    pub limit: Option<usize>,
}

/// Output format for the history command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryOutput {
    /// Whether history was loaded.
    pub success: bool,
    /// Recent-form report.
    pub report: HistoryReport,
    /// Sessions, newest first.
    pub sessions: Vec<SessionInfo>,
}

/// One session as listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub date: DateTime<Utc>,
    pub score: f64,
    pub band: ScoreBand,
    pub insights: String,
    pub shot_count: usize,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            date: session.date(),
            score: session.score(),
            band: ScoreBand::for_score(session.score()),
            insights: session.insights().to_string(),
            shot_count: session.shots().len(),
        }
    }
}

/// The history command implementation.
pub struct HistoryCommand<S: KeyValueStore> {
    state: AppState<S>,
}

impl<S: KeyValueStore> HistoryCommand<S> {
    /// Create a new history command.
    pub fn new(store: S) -> Self {
        Self {
            state: AppState::load(store),
        }
    }

    /// Run the history command.
    pub fn run(&self, options: &HistoryOptions) -> HistoryOutput {
        let sessions = self.state.sessions();
        let report = HistoryReport::from_sessions(&sessions);

        let limit = options.limit.unwrap_or(sessions.len());
        let listed = sessions
            .iter()
            .rev()
            .take(limit)
            .map(SessionInfo::from)
            .collect();

        HistoryOutput {
            success: true,
            report,
            sessions: listed,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &HistoryOutput, options: &HistoryOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &HistoryOutput) -> String {
        let report = &output.report;
        if report.total_sessions == 0 {
            return "No sessions recorded yet. Run 'fairway test' to start.".to_string();
        }

        let mut lines = Vec::new();
        lines.push(format!(
            "Recent form (last {} of {} sessions)",
            report.recent_scores.len(),
            report.total_sessions
        ));
        lines.push(format!("  Average: {:.1}", report.recent_average));
        lines.push(format!(
            "  Trend:   {} {}",
            report.trend.arrow(),
            report.trend.display_name()
        ));
        lines.push(String::new());

        lines.push(format!("Highlight: {}", report.summary.highlight));
        lines.push(format!("Work on:   {}", report.summary.work_on));
        lines.push(format!("Tips:      {}", report.summary.improvements));
        lines.push(String::new());

        lines.push("Sessions".to_string());
        for session in &output.sessions {
            lines.push(format!(
                "  {}  {:>5.1}  {:<6}  {} shots",
                session.date.format("%Y-%m-%d %H:%M"),
                session.score,
                session.band.display_name(),
                session.shot_count
            ));
        }

        lines.join("\n")
    }
}
