//! CLI commands for Fairway.
//!
//! This module provides CLI commands for Fairway, organized into:
//! - **Practice**: test (play a session against random targets)
//! - **Review**: history, clubs, status
//! - **Setup**: bag

// Practice
pub mod test_cmd;

// Review
pub mod clubs;
pub mod history;
pub mod status;

// Setup
pub mod bag;

pub use bag::{BagAction, BagCommand};
pub use clubs::ClubsCommand;
pub use history::HistoryCommand;
pub use status::StatusCommand;
pub use test_cmd::TestCommand;
