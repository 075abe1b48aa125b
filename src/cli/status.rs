//! Status command for Fairway.
//!
//! Greets the golfer with bag and history counts and records the visit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::AppState;
use crate::stats::trend::{average, recent_window};
use crate::storage::KeyValueStore;

/// Options for the status command.
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the status command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    /// Whether the visit was recorded.
    pub success: bool,
    /// Number of clubs in the bag.
    pub bag_size: usize,
    /// Number of recorded sessions.
    pub session_count: usize,
    /// Score of the newest session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_score: Option<f64>,
    /// Average of the recent window.
    pub recent_average: f64,
    /// Previous visit, before this one was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<DateTime<Utc>>,
    /// Whole days since the previous visit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_last_visit: Option<i64>,
    /// Error message if the visit could not be recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The status command implementation.
pub struct StatusCommand<S: KeyValueStore> {
    state: AppState<S>,
}

impl<S: KeyValueStore> StatusCommand<S> {
    /// Create a new status command.
    pub fn new(store: S) -> Self {
        Self {
            state: AppState::load(store),
        }
    }

    /// Run the status command as of `now`.
    pub fn run(&mut self, now: DateTime<Utc>) -> StatusOutput {
        let sessions = self.state.sessions();
        let recent: Vec<f64> = recent_window(&sessions).iter().map(|s| s.score()).collect();

        let mut output = StatusOutput {
            success: true,
            bag_size: self.state.bag().len(),
            session_count: sessions.len(),
            latest_score: sessions.last().map(|s| s.score()),
            recent_average: average(&recent),
            last_visit: self.state.last_visit(),
            days_since_last_visit: self.state.days_since_last_visit(now),
            error: None,
        };

        if let Err(e) = self.state.touch_visit(now) {
            output.success = false;
            output.error = Some(format!("Failed to record visit: {}", e));
        }

        output
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatusOutput, options: &StatusOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &StatusOutput) -> String {
        let mut lines = Vec::new();

        match output.days_since_last_visit {
            None => lines.push("Welcome to Fairway!".to_string()),
            Some(0) => lines.push("Welcome back!".to_string()),
            Some(1) => lines.push("Welcome back! Your last visit was yesterday.".to_string()),
            Some(days) => lines.push(format!(
                "Welcome back! It has been {} days since your last visit.",
                days
            )),
        }

        lines.push(format!("  Clubs in bag: {}", output.bag_size));
        lines.push(format!("  Sessions:     {}", output.session_count));
        if let Some(score) = output.latest_score {
            lines.push(format!("  Last score:   {:.1}", score));
            lines.push(format!("  Recent avg:   {:.1}", output.recent_average));
        }

        if output.bag_size == 0 {
            lines.push(String::new());
            lines.push("Set up your bag with 'fairway bag add <club>...'.".to_string());
        }

        if let Some(error) = &output.error {
            lines.push(format!("Warning: {}", error));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClubBag, Session};
    use crate::storage::MemoryKeyValueStore;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 20, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_first_visit() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut cmd = StatusCommand::new(Arc::clone(&store));
        let output = cmd.run(now());

        assert!(output.success);
        assert_eq!(output.bag_size, 0);
        assert_eq!(output.session_count, 0);
        assert_eq!(output.recent_average, 0.0);
        assert!(output.last_visit.is_none());
        assert!(output.days_since_last_visit.is_none());

        let text = cmd.format_output(&output, &StatusOptions::default());
        assert!(text.contains("Welcome to Fairway!"));
        assert!(text.contains("Set up your bag"));

        // The visit is recorded for next time
        assert_eq!(AppState::load(store).last_visit(), Some(now()));
    }

    #[test]
    fn test_returning_visit() {
        let store = Arc::new(MemoryKeyValueStore::new());
        {
            let mut state = AppState::load(Arc::clone(&store));
            state.touch_visit(now() - Duration::days(4)).unwrap();
            let bag: ClubBag = ["Driver", "7 Iron"].into_iter().collect();
            state.save_bag(bag).unwrap();
            state
                .record_session(&Session::new(now() - Duration::days(4), 72.0, "", vec![]))
                .unwrap();
        }

        let mut cmd = StatusCommand::new(store);
        let output = cmd.run(now());

        assert_eq!(output.bag_size, 2);
        assert_eq!(output.session_count, 1);
        assert_eq!(output.latest_score, Some(72.0));
        assert_eq!(output.days_since_last_visit, Some(4));

        let text = cmd.format_output(&output, &StatusOptions::default());
        assert!(text.contains("4 days since your last visit"));
        assert!(text.contains("Last score:   72.0"));
    }

    #[test]
    fn test_json_output() {
        let mut cmd = StatusCommand::new(MemoryKeyValueStore::new());
        let output = cmd.run(now());
        let json = cmd.format_output(
            &output,
            &StatusOptions {
                json: true,
                quiet: false,
            },
        );
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["success"], true);
        assert!(parsed.get("days_since_last_visit").is_none());
    }
}
