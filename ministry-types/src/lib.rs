//! Core type definitions for Ministry Suite.
//!
//! This crate defines the small, record-agnostic types shared by every other
//! crate in the workspace:
//! - Owner and record identifiers (UUID v7)
//! - Millisecond [`Timestamp`]s used for created/updated/archived stamps
//!
//! Sermon and series records themselves live in `ministry-model`.

mod ids;
mod timestamp;

pub use ids::{SeriesId, SermonId, UserId};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
