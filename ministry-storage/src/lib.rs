//! SQLite storage layer for Ministry Suite.
//!
//! Sermons and series are stored as JSON documents, one row per record, with
//! a handful of indexed columns (owner, series reference, active flag,
//! creation time) pulled out for filtering and ordering.
//!
//! # Architecture
//!
//! - Every query is scoped to the owning user
//! - Sermon reads join the referenced series one level deep
//! - Lists are returned newest first
//! - The schema is created on open

mod error;
mod sermon_store;

pub use error::{StorageError, StorageResult};
pub use sermon_store::{SeriesFilter, SermonStore};
