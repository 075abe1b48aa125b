//! Error types for Fairway with a fail-open policy for persisted data.
//!
//! Stored blobs that are missing or malformed never block the golfer: the
//! read paths log a warning and fall back to an empty collection. Errors are
//! only surfaced for genuine misuse (bad test parameters, mismatched shot
//! and target counts) and for failed writes.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Fairway operations.
#[derive(Error, Debug)]
pub enum FairwayError {
    /// I/O errors from the key-value store files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON encoding or decoding errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Caller-supplied values outside the accepted domain.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

/// A specialized Result type for Fairway operations.
pub type Result<T> = std::result::Result<T, FairwayError>;

impl FairwayError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<io::Error> for FairwayError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for FairwayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Fail-open handling for results read back from storage.
///
/// Logs the error and substitutes a safe value instead of propagating.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }
}

/// Process exit codes for the `fairway` binary.
pub mod exit_codes {
    /// Command completed.
    pub const OK: i32 = 0;

    /// Command ran but reported a failure.
    pub const ERROR: i32 = 1;

    /// The process panicked.
    pub const CRASH: i32 = 3;
}
