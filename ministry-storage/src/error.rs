//! Error types for the storage layer.

use ministry_model::ModelError;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record not found, or owned by someone else.
    #[error("not found: {0}")]
    NotFound(String),

    /// Input rejected by the model.
    #[error("invalid input: {0}")]
    Invalid(#[from] ModelError),

    /// Stored data could not be decoded.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A writer panicked while holding the connection.
    #[error("connection lock poisoned")]
    LockPoisoned,
}
