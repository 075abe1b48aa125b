//! Core types for Fairway.
//!
//! Shots, sessions, the club catalog and bag, the in-progress test run, and
//! the persisted application state.

pub mod bag;
pub mod club;
pub mod session;
pub mod shot;
pub mod state;
pub mod test_run;

pub use bag::ClubBag;
pub use club::{abbreviation, canonical_name, canonical_rank, ClubCategory, CATEGORIES, CLUB_ORDER};
pub use session::Session;
pub use shot::{Direction, Shot};
pub use state::AppState;
pub use test_run::TestRun;
