//! Fairway - practice-range test log
//!
//! Fairway records practice-range tests (club, carry distance and lateral
//! miss for each shot against a random target), scores each shot and
//! session, and derives per-club statistics and a recent-form trend from
//! the stored history.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod stats;
pub mod storage;

pub use config::Config;
pub use core::{AppState, ClubBag, Direction, Session, Shot, TestRun};
pub use error::{FairwayError, Result};
pub use stats::{
    club_report, generate_targets, session_score, shot_score, ClubStats, HistoryReport,
    ScoreBand, Summary, TargetPlan, Trend,
};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

// CLI commands
pub use cli::{BagCommand, ClubsCommand, HistoryCommand, StatusCommand, TestCommand};
