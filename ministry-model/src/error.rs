//! Validation errors for record inputs.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when an input cannot become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A required field was missing or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field held a value outside its allowed range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
