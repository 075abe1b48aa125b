//! Key-value storage trait for Fairway.
//!
//! The store is an opaque map from string keys to byte blobs. It knows
//! nothing about sessions or bags; typed access goes through the JSON
//! helpers below.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Trait for key-value storage backends.
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the blob stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Check if a key has been stored.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Read and decode a JSON blob.
    ///
    /// A missing key is `Ok(None)`; a blob that does not decode is an error.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encode a value as JSON and store it.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let bytes = serde_json::to_vec(value)?;
        self.set(key, &bytes)
    }
}

/// Lets tests share one store between `AppState` instances.
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
}
