//! Configuration file discovery, reading, and writing.
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./ticklist.json5` or `./ticklist.json`
//! 2. User: `~/.config/ticklist/config.json5` or `~/.config/ticklist/config.json`
//!
//! Both formats are read with the JSON5 parser; files are always written as
//! pretty-printed JSON. The task list itself is not configuration: it lives
//! in the data directory and is handled by [`crate::state`].

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Local configuration file names, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["ticklist.json5", "ticklist.json"];

/// Directory name used under the user config and data directories.
const APP_DIR: &str = "ticklist";

/// User configuration file names, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the first existing configuration file.
///
/// Local files win over files in the user config directory. Returns `None`
/// if no configuration file exists.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(PathBuf::from);
    let user = dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .into_iter()
        .flat_map(|dir| USER_CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)));

    local.chain(user).find(|path| path.exists())
}

/// Returns the user configuration directory, typically `~/.config/ticklist/`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the default data directory, where the task list and log live.
///
/// This is typically `~/.local/share/ticklist/` on Linux.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a JSON or JSON5 configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Examples
///
/// ```no_run
/// use ticklist_config::Config;
/// use ticklist_config::persistence::read_config_file;
///
/// # fn main() -> ticklist_config::Result<()> {
/// let config: Config = read_config_file("ticklist.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json5::from_str(&content)?)
}

/// Writes a value as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the file (or its
/// parent directory) cannot be written.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).map_err(write_error)
}
