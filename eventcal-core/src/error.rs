//! Error types for eventcal.

use thiserror::Error;

/// Errors that can occur in eventcal operations.
#[derive(Error, Debug)]
pub enum EventCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid event: {0}")]
    Draft(#[from] DraftError),
}

/// Failures reading or writing the key-value storage behind the event store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Validation failures for user-entered event drafts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Event name is required.")]
    EmptyName,
}

/// Result type alias for eventcal operations.
pub type EventCalResult<T> = Result<T, EventCalError>;
