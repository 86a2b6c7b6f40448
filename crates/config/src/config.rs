//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the ticklist application.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::persistence::{default_data_dir, find_config_file, read_config_file, write_config_file};
use crate::state::DEFAULT_STATE_KEY;

/// Environment variable overriding [`StorageConfig::directory`].
pub const ENV_STORAGE_DIR: &str = "TICKLIST_STORAGE_DIR";

/// Environment variable overriding [`LoggingConfig::level`].
pub const ENV_LOG_LEVEL: &str = "TICKLIST_LOG";

/// Log levels accepted by [`LoggingConfig::level`].
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// The main configuration struct for the ticklist application.
///
/// # Examples
///
/// ```
/// use ticklist_config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.storage.key, "state");
/// assert_eq!(config.logging.level, "info");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where the task list is stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Task list storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the stored task list. Defaults to the user data
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Storage key the task list is written under.
    #[serde(default = "default_state_key")]
    pub key: String,
}

fn default_state_key() -> String {
    DEFAULT_STATE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: None,
            key: default_state_key(),
        }
    }
}

impl StorageConfig {
    /// Returns the configured directory, or the default data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the data directory
    /// cannot be determined.
    pub fn resolved_directory(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written to the log (`trace`, `debug`, `info`, `warn`,
    /// `error`, or `off`). `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path. Defaults to `ticklist.log` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Returns the configured log file, or `ticklist.log` in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no file is configured and the data directory
    /// cannot be determined.
    pub fn resolved_file(&self) -> Result<PathBuf> {
        match &self.file {
            Some(file) => Ok(file.clone()),
            None => Ok(default_data_dir()?.join("ticklist.log")),
        }
    }
}

impl Config {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Returns the default configuration if no file is found. Environment
    /// overrides are not applied; see [`Config::apply_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    pub async fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticklist_config::Config;
    ///
    /// let mut config = Config::default();
    /// config.apply_overrides(|name| (name == "TICKLIST_LOG").then(|| "debug".to_string()));
    /// assert_eq!(config.logging.level, "debug");
    /// assert!(config.storage.directory.is_none());
    /// ```
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|v| !v.is_empty()) {
            self.storage.directory = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.logging.level = level;
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for an unknown log level.
    pub fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.logging.level.clone()));
        }
        Ok(())
    }
}
