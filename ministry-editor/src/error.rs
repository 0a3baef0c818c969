//! Error types for editing sessions.

use ministry_autosave::AutoSaveError;
use ministry_storage::StorageError;
use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur while loading or saving a sermon.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The store rejected a read or write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A save through the autosave controller failed.
    #[error(transparent)]
    Save(#[from] AutoSaveError),

    /// A blocking store task panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for EditorError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}
