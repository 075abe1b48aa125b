//! Derived statistics for Fairway.
//!
//! Pure functions over shots and sessions: scoring, target generation,
//! per-club aggregation, and recent-form trend. Nothing here is persisted;
//! every figure is recomputed from the stored history on demand.

pub mod clubs;
pub mod scoring;
pub mod targets;
pub mod trend;

pub use clubs::{club_report, consistency_score, ClubStats};
pub use scoring::{session_insight, session_score, shot_score, thresholds, ScoreBand};
pub use targets::{generate_targets, TargetPlan};
pub use trend::{HistoryReport, Summary, Trend, RECENT_WINDOW};
