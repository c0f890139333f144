//! Error types for tabgroups
//!
//! This module defines all error types used throughout the crate,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for tab group operations
///
/// Manager-level variants (`NotFound`, `Conflict`, `StorageUnavailable`)
/// always propagate to the caller. `TransientOpenFailure` and
/// `MalformedStorage` describe conditions that are logged and swallowed;
/// they exist so the log lines carry a consistent message.
#[derive(Error, Debug)]
pub enum TabGroupError {
    /// No tab group with the given name exists
    #[error("Tab group '{0}' not found")]
    NotFound(String),

    /// A different tab group already uses the requested name
    #[error("Tab group '{0}' already exists")]
    Conflict(String),

    /// The selected backend cannot persist the collection
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A single document failed to open while loading a group
    #[error("Failed to open '{path}': {reason}")]
    TransientOpenFailure {
        /// Path that could not be opened
        path: String,
        /// Underlying failure description
        reason: String,
    },

    /// Stored data could not be parsed and was treated as empty
    #[error("Malformed storage at {location}: {reason}")]
    MalformedStorage {
        /// Key or file path holding the bad data
        location: String,
        /// Parser error description
        reason: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key/value engine errors (open, insert, flush)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Editor integration errors (opener command failures, etc.)
    #[error("Editor error: {0}")]
    Editor(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for tabgroups operations
///
/// Uses `anyhow::Error` so callers get context chains; typed errors are
/// recovered with `downcast_ref::<TabGroupError>()`.
pub type Result<T> = anyhow::Result<T>;

impl TabGroupError {
    /// Returns true if `err` wraps a `NotFound` error
    pub fn is_not_found(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<TabGroupError>(),
            Some(TabGroupError::NotFound(_))
        )
    }

    /// Returns true if `err` wraps a `Conflict` error
    pub fn is_conflict(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<TabGroupError>(),
            Some(TabGroupError::Conflict(_))
        )
    }

    /// Returns true if `err` wraps a `StorageUnavailable` error
    pub fn is_storage_unavailable(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<TabGroupError>(),
            Some(TabGroupError::StorageUnavailable(_))
        )
    }
}
