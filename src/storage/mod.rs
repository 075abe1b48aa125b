//! Key-value persistence for Fairway.
//!
//! This module provides the opaque blob store the application state is
//! persisted in, with file-based and in-memory backends, plus the key names
//! the application uses.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStore;

/// Storage keys used by the application.
pub mod keys {
    /// JSON array of club names.
    pub const USER_BAG: &str = "userBagData";
    /// JSON array of every recorded session.
    pub const TEST_SESSIONS: &str = "testSessions";
    /// Seconds since the Unix epoch of the last visit.
    pub const LAST_VISIT: &str = "lastVisitTimestamp";
}
