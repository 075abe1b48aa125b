//! Completed test sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::Shot;

/// Lowest storable session score.
pub const MIN_SCORE: f64 = 0.0;
/// Highest storable session score.
pub const MAX_SCORE: f64 = 100.0;

/// One completed practice test.
///
/// Sessions are immutable once created. The score is clamped into
/// `[MIN_SCORE, MAX_SCORE]` both here and when decoded from storage.
/// Unreadable shots are dropped on decode; the rest of the session is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_score")]
    score: f64,
    insights: String,
    #[serde(deserialize_with = "deserialize_shots")]
    shots: Vec<Shot>,
}

impl Session {
    /// Create a session. Non-finite scores are stored as `MIN_SCORE`.
    pub fn new(
        date: DateTime<Utc>,
        score: f64,
        insights: impl Into<String>,
        shots: Vec<Shot>,
    ) -> Self {
        Self {
            date,
            score: clamp_score(score),
            insights: insights.into(),
            shots,
        }
    }

    /// When the session was finished.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Overall session score in `[0, 100]`.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Insight text recorded with the session.
    pub fn insights(&self) -> &str {
        &self.insights
    }

    /// Shots in the order they were entered.
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

fn deserialize_score<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_score)
}

fn deserialize_shots<'de, D>(deserializer: D) -> std::result::Result<Vec<Shot>, D::Error>
where
    D: Deserializer<'de>,
{
    let records = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Shot>(record) {
            Ok(shot) => Some(shot),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable shot");
                None
            }
        })
        .collect())
}
