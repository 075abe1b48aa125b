//! Configuration loading for Fairway.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.fairway/config.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FairwayError, Result};
use crate::stats::TargetPlan;

/// Main configuration struct for Fairway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Defaults for new tests.
    pub test: TestConfig,
    /// Where data is stored.
    pub storage: StorageConfig,
}

/// Defaults offered when starting a test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TestConfig {
    /// Number of shots per test.
    pub shots: usize,
    /// Shortest target in yards.
    pub min_yardage: f64,
    /// Longest target in yards.
    pub max_yardage: f64,
}

impl TestConfig {
    /// Target plan described by these defaults.
    pub fn plan(&self) -> TargetPlan {
        TargetPlan::new(self.shots, self.min_yardage, self.max_yardage)
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            shots: 10,
            min_yardage: 100.0,
            max_yardage: 150.0,
        }
    }
}

/// Storage location configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration with the full precedence chain.
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        config.apply_env_overrides();
        config
    }

    /// Load user config from `<fairway_home>/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = fairway_home()?;
        let config_path = home.join("config.toml");
        if !config_path.exists() {
            return None;
        }
        match Self::load_from_file(&config_path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable user config");
                None
            }
        }
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| FairwayError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| FairwayError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // FAIRWAY_TEST_SHOTS
        if let Ok(val) = env::var("FAIRWAY_TEST_SHOTS") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => self.test.shots = n,
                _ => tracing::warn!(
                    "Invalid FAIRWAY_TEST_SHOTS value '{}'. Expected a positive integer. Using '{}'.",
                    val,
                    self.test.shots
                ),
            }
        }

        // FAIRWAY_MIN_YARDAGE
        if let Ok(val) = env::var("FAIRWAY_MIN_YARDAGE") {
            match val.parse::<f64>() {
                Ok(n) if n.is_finite() => self.test.min_yardage = n,
                _ => tracing::warn!(
                    "Invalid FAIRWAY_MIN_YARDAGE value '{}'. Expected a number. Using '{}'.",
                    val,
                    self.test.min_yardage
                ),
            }
        }

        // FAIRWAY_MAX_YARDAGE
        if let Ok(val) = env::var("FAIRWAY_MAX_YARDAGE") {
            match val.parse::<f64>() {
                Ok(n) if n.is_finite() => self.test.max_yardage = n,
                _ => tracing::warn!(
                    "Invalid FAIRWAY_MAX_YARDAGE value '{}'. Expected a number. Using '{}'.",
                    val,
                    self.test.max_yardage
                ),
            }
        }

        // FAIRWAY_DATA_DIR
        if let Ok(val) = env::var("FAIRWAY_DATA_DIR") {
            if val.is_empty() {
                tracing::warn!("FAIRWAY_DATA_DIR is empty, ignoring");
            } else {
                self.storage.data_dir = Some(PathBuf::from(val));
            }
        }
    }

    /// Merge another config into this one; non-default values in `other` win.
    fn merge(mut self, other: Config) -> Self {
        let default_test = TestConfig::default();
        if other.test.shots != default_test.shots {
            self.test.shots = other.test.shots;
        }
        if other.test.min_yardage != default_test.min_yardage {
            self.test.min_yardage = other.test.min_yardage;
        }
        if other.test.max_yardage != default_test.max_yardage {
            self.test.max_yardage = other.test.max_yardage;
        }

        if other.storage.data_dir.is_some() {
            self.storage.data_dir = other.storage.data_dir;
        }

        self
    }

    /// Directory the file store should use.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage.data_dir.clone().or_else(data_dir)
    }
}

/// Get the Fairway home directory.
///
/// Checks `FAIRWAY_HOME` first, then falls back to `~/.fairway`.
pub fn fairway_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("FAIRWAY_HOME") {
        if home.is_empty() {
            tracing::warn!("FAIRWAY_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".fairway"))
}

/// Get the default data directory, `<fairway_home>/data/`.
pub fn data_dir() -> Option<PathBuf> {
    fairway_home().map(|h| h.join("data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        for var in [
            "FAIRWAY_HOME",
            "FAIRWAY_TEST_SHOTS",
            "FAIRWAY_MIN_YARDAGE",
            "FAIRWAY_MAX_YARDAGE",
            "FAIRWAY_DATA_DIR",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.test.shots, 10);
        assert_eq!(config.test.min_yardage, 100.0);
        assert_eq!(config.test.max_yardage, 150.0);
        assert!(config.storage.data_dir.is_none());
        assert!(config.test.plan().validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");

        let toml_content = r#"
[test]
shots = 6
max_yardage = 180.0
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();

        assert_eq!(config.test.shots, 6);
        assert_eq!(config.test.max_yardage, 180.0);
        // Unset fields keep defaults
        assert_eq!(config.test.min_yardage, 100.0);
    }

    #[test]
    fn test_load_from_file_missing() {
        let result = Config::load_from_file(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "this is not valid toml [[[").unwrap();

        let result = Config::load_from_file(&config_path);
        assert!(matches!(result, Err(FairwayError::Config { .. })));
    }

    #[test]
    fn test_merge_takes_non_defaults() {
        let mut other = Config::default();
        other.test.min_yardage = 60.0;
        other.storage.data_dir = Some(PathBuf::from("/srv/fairway"));

        let merged = Config::default().merge(other);
        assert_eq!(merged.test.min_yardage, 60.0);
        assert_eq!(merged.test.max_yardage, 150.0);
        assert_eq!(merged.data_dir(), Some(PathBuf::from("/srv/fairway")));
    }

    #[test]
    #[serial]
    fn test_user_config_from_home() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[test]\nshots = 4\nmin_yardage = 50.0\nmax_yardage = 90.0\n",
        )
        .unwrap();
        env::set_var("FAIRWAY_HOME", dir.path());

        let config = Config::load();
        assert_eq!(config.test.shots, 4);
        assert_eq!(config.test.min_yardage, 50.0);
        assert_eq!(config.test.max_yardage, 90.0);
        assert_eq!(config.data_dir(), Some(dir.path().join("data")));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_overrides_user_config() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[test]\nshots = 4\n").unwrap();
        env::set_var("FAIRWAY_HOME", dir.path());
        env::set_var("FAIRWAY_TEST_SHOTS", "12");
        env::set_var("FAIRWAY_DATA_DIR", "/tmp/fairway-data");

        let config = Config::load();
        assert_eq!(config.test.shots, 12);
        assert_eq!(config.data_dir(), Some(PathBuf::from("/tmp/fairway-data")));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_env_values_ignored() {
        clear_env();
        let dir = TempDir::new().unwrap();
        env::set_var("FAIRWAY_HOME", dir.path());
        env::set_var("FAIRWAY_TEST_SHOTS", "0");
        env::set_var("FAIRWAY_MIN_YARDAGE", "far");
        env::set_var("FAIRWAY_MAX_YARDAGE", "inf");

        let config = Config::load();
        assert_eq!(config.test, TestConfig::default());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unreadable_user_config_falls_back() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "shots = [[[").unwrap();
        env::set_var("FAIRWAY_HOME", dir.path());

        let config = Config::load();
        assert_eq!(config, Config::default());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_fairway_home_env() {
        clear_env();
        env::set_var("FAIRWAY_HOME", "/opt/fairway");
        assert_eq!(fairway_home(), Some(PathBuf::from("/opt/fairway")));
        assert_eq!(data_dir(), Some(PathBuf::from("/opt/fairway/data")));
        clear_env();
    }
}
