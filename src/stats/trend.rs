//! Recent-form trend and summary text.
//!
//! Only the last [`RECENT_WINDOW`] sessions (by date) count. The trend is
//! the sign of an ordinary least-squares slope of score against session
//! index, with a dead band of [`SLOPE_DEAD_BAND`] points per session.

use serde::{Deserialize, Serialize};

use crate::core::Session;
use crate::stats::scoring::thresholds;

/// Number of most recent sessions considered.
pub const RECENT_WINDOW: usize = 5;
/// Slopes within `±SLOPE_DEAD_BAND` classify as stable.
pub const SLOPE_DEAD_BAND: f64 = 0.5;

/// Direction of recent scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    /// Classify a slope in points per session.
    pub fn from_slope(slope: f64) -> Self {
        if slope > SLOPE_DEAD_BAND {
            Trend::Improving
        } else if slope < -SLOPE_DEAD_BAND {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Trend::Improving => "Improving",
            Trend::Declining => "Declining",
            Trend::Stable => "Stable",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Improving => "↑",
            Trend::Declining => "↓",
            Trend::Stable => "→",
        }
    }
}

/// The most recent sessions of a chronologically ordered history.
pub fn recent_window(sessions: &[Session]) -> &[Session] {
    let start = sessions.len().saturating_sub(RECENT_WINDOW);
    &sessions[start..]
}

/// Mean of the scores, or 0 when there are none.
pub fn average(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Least-squares slope of `scores` against `x = 1..=n`.
///
/// Returns `None` for fewer than two points.
pub fn slope(scores: &[f64]) -> Option<f64> {
    if scores.len() < 2 {
        return None;
    }

    let n = scores.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in scores.iter().enumerate() {
        let x = (i + 1) as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    Some((n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x))
}

/// Trend of a score series; fewer than two scores is stable.
pub fn classify(scores: &[f64]) -> Trend {
    slope(scores).map(Trend::from_slope).unwrap_or(Trend::Stable)
}

/// Three lines of coaching text chosen from the recent average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub highlight: String,
    pub work_on: String,
    pub improvements: String,
}

impl Summary {
    /// Summary for a recent window of scores.
    pub fn for_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self {
                highlight: "No data yet.".to_string(),
                work_on: "Start testing to build insights.".to_string(),
                improvements: "Complete more sessions for personalized tips.".to_string(),
            };
        }

        let avg = average(scores);
        let best = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let highlight = if avg > thresholds::HIGH {
            format!(
                "Strong consistency with an average of {:.1}. Best session: {:.1}.",
                avg, best
            )
        } else if avg > thresholds::MEDIUM {
            format!("Solid foundation; peaking at {:.1}.", best)
        } else {
            format!("Building experience; highlight session at {:.1}.", best)
        };

        let work_on = if avg < thresholds::MEDIUM {
            "Focus on overall accuracy and deviation control."
        } else if avg < thresholds::HIGH {
            "Refine club selection and distance consistency."
        } else {
            "Maintain high performance; minor tweaks for perfection."
        };

        let improvements = if avg < thresholds::MEDIUM {
            "Practice alignment drills: Use alignment sticks at the range. \
             Work on tempo with metronome swings. \
             Consider a lesson for swing path analysis."
        } else if avg < thresholds::HIGH {
            "Incorporate yardage gaps testing: Hit 10 shots per club to map distances. \
             Use video analysis for posture checks. \
             Strengthen core for better stability."
        } else {
            "Advanced drills: Simulate on-course pressure with random targets. \
             Track stats in a journal. \
             Experiment with equipment tweaks like grip size."
        };

        Self {
            highlight,
            work_on: work_on.to_string(),
            improvements: improvements.to_string(),
        }
    }
}

/// Everything the history view shows about recent form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReport {
    pub total_sessions: usize,
    pub recent_scores: Vec<f64>,
    pub recent_average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,
    pub trend: Trend,
    pub summary: Summary,
}

impl HistoryReport {
    /// Build the report from a chronologically ordered history.
    pub fn from_sessions(sessions: &[Session]) -> Self {
        let recent_scores: Vec<f64> = recent_window(sessions)
            .iter()
            .map(Session::score)
            .collect();
        let slope = slope(&recent_scores);

        Self {
            total_sessions: sessions.len(),
            recent_average: average(&recent_scores),
            trend: classify(&recent_scores),
            slope,
            summary: Summary::for_scores(&recent_scores),
            recent_scores,
        }
    }
}
