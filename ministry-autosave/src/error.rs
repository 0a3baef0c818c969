//! Error types for autosave.

use thiserror::Error;

/// Boxed error returned by a failing save handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for autosave operations.
pub type AutoSaveResult<T> = Result<T, AutoSaveError>;

/// Errors surfaced by the controller.
#[derive(Debug, Error)]
pub enum AutoSaveError {
    /// The save handler failed. The snapshot is unchanged.
    #[error("failed to save: {message}")]
    SaveFailed {
        message: String,
        #[source]
        source: BoxError,
    },

    /// The controller was shut down.
    #[error("auto-save controller has been shut down")]
    ShutDown,
}

impl AutoSaveError {
    pub(crate) fn save_failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SaveFailed {
            message: error.to_string(),
            source: Box::new(error),
        }
    }
}
