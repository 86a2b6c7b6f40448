//! Error types for the ticklist-protocol crate.
//!
//! This module defines the errors that can occur when encoding or decoding
//! task lists and when validating store operations.

use thiserror::Error;

use crate::task::TaskId;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Failed to serialize a task list to JSON.
    #[error("failed to serialize to JSON: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Failed to deserialize a task list from JSON.
    #[error("failed to deserialize from JSON: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// A task with the given ID was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A proposed ordering is not a permutation of the current tasks.
    #[error("ordering of {given} ids is not a permutation of the {expected} current tasks")]
    NotAPermutation {
        /// Number of tasks currently in the store.
        expected: usize,
        /// Number of ids in the proposed ordering.
        given: usize,
    },
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProtocolError::TaskNotFound(TaskId::from("abc"));
        assert_eq!(err.to_string(), "task not found: abc");

        let err = ProtocolError::NotAPermutation {
            expected: 3,
            given: 2,
        };
        assert!(err.to_string().contains("not a permutation"));
    }
}
