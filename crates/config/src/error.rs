//! Error types for configuration and persistence operations.
//!
//! This module defines the error types that can occur during configuration
//! loading, parsing, and validation, and while reading or writing the
//! persisted task list.

use std::path::PathBuf;

use ticklist_protocol::ProtocolError;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Failed to serialize configuration to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// The configured log level is not recognised.
    #[error("invalid log level {0:?}: expected one of trace, debug, info, warn, error, off")]
    InvalidLogLevel(String),

    /// Failed to determine the home or data directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading or saving the task list.
///
/// None of these are fatal: read failures fall back to an empty list and
/// write failures are logged while the in-memory list keeps working.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The storage backend could not be read.
    #[error("failed to read stored value {key:?}: {source}")]
    Read {
        /// The storage key.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The stored value is not a valid task list.
    #[error("stored value {key:?} is not a valid task list: {source}")]
    Corrupt {
        /// The storage key.
        key: String,
        /// The decoding error.
        #[source]
        source: ProtocolError,
    },

    /// The storage backend could not be written.
    #[error("failed to write stored value {key:?}: {source}")]
    Write {
        /// The storage key.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The task list could not be encoded.
    #[error("failed to encode task list: {0}")]
    Encode(#[source] ProtocolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ConfigError::InvalidLogLevel("loud".to_string());
        assert!(err.to_string().contains("\"loud\""));

        let err = PersistenceError::Write {
            key: "state".to_string(),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(
            err.to_string(),
            "failed to write stored value \"state\": disk full"
        );
    }
}
