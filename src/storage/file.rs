//! File-based key-value storage for Fairway.
//!
//! Each key is stored as `<data_dir>/<key>.json`. Writes go to a temp file
//! that is then renamed over the target, so a crash mid-write leaves the
//! previous blob intact.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::data_dir;
use crate::error::{FairwayError, Result};
use crate::storage::KeyValueStore;

/// File-based key-value store.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    /// Directory holding one file per key.
    data_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store in the default data directory.
    ///
    /// Uses `~/.fairway/data/` or `$FAIRWAY_HOME/data/`.
    pub fn new() -> Result<Self> {
        let dir = data_dir().ok_or_else(|| {
            FairwayError::config("Could not determine data directory (no home directory)")
        })?;
        Self::with_dir(dir)
    }

    /// Create a store in a custom directory, creating it if needed.
    pub fn with_dir(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| FairwayError::storage(&data_dir, e))?;
        }

        Ok(Self { data_dir })
    }

    /// Directory the store writes into.
    pub fn dir(&self) -> &std::path::Path {
        &self.data_dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.data_dir.join(format!("{}.json", key)))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!(".{}.json.tmp", key))
    }
}

/// Keys become file names, so they must not be able to escape the directory.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(FairwayError::invalid_input(format!(
            "invalid storage key: {:?}",
            key
        )))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| FairwayError::storage(&path, e))?;
        Ok(Some(bytes))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let final_path = self.key_path(key)?;
        let temp_path = self.temp_path(key);

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| FairwayError::storage(&temp_path, e))?;
            file.write_all(value)
                .map_err(|e| FairwayError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| FairwayError::storage(&temp_path, e))?;
        }

        // Rename is atomic on POSIX
        fs::rename(&temp_path, &final_path).map_err(|e| FairwayError::storage(&final_path, e))?;

        tracing::debug!(key, bytes = value.len(), "stored blob");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::tests::test_key_value_store_contract;
    use tempfile::TempDir;

    fn create_test_store() -> (FileKeyValueStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_dir(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn test_file_store_contract() {
        let (store, _dir) = create_test_store();
        test_key_value_store_contract(&store);
    }

    #[test]
    fn test_with_dir_creates_directory() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("data");

        assert!(!data_path.exists());

        let store = FileKeyValueStore::with_dir(&data_path).unwrap();

        assert!(data_path.is_dir());
        assert_eq!(store.dir(), data_path.as_path());
    }

    #[test]
    fn test_key_path() {
        let (store, _dir) = create_test_store();
        let path = store.key_path("testSessions").unwrap();
        assert!(path.ends_with("testSessions.json"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (store, _dir) = create_test_store();
        assert!(store.set("../escape", b"x").is_err());
        assert!(store.set("a/b", b"x").is_err());
        assert!(store.set(".hidden", b"x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_value_persists_across_instances() {
        let dir = TempDir::new().unwrap();

        FileKeyValueStore::with_dir(dir.path())
            .unwrap()
            .set("userBagData", br#"["Driver","7 Iron"]"#)
            .unwrap();

        let reopened = FileKeyValueStore::with_dir(dir.path()).unwrap();
        assert_eq!(
            reopened.get("userBagData").unwrap().unwrap(),
            br#"["Driver","7 Iron"]"#.to_vec()
        );
    }

    #[test]
    fn test_temp_file_cleaned_up() {
        let (store, _dir) = create_test_store();

        store.set("testSessions", b"[]").unwrap();

        assert!(!store.temp_path("testSessions").exists());
    }
}
