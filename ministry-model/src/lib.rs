//! Sermon and series records for Ministry Suite.
//!
//! Defines the document types every other crate exchanges:
//! - [`SermonSeries`]: a named, colour-tagged grouping that can be archived
//! - [`Sermon`]: the stored sermon document (references its series by id)
//! - [`PopulatedSermon`]: a sermon with its series joined in, as returned by reads
//! - [`SermonPatch`]: the whitelisted partial update applied by the editor
//! - [`SermonDraft`]: the editable subset the sermon editor autosaves
//!
//! All types serialize with camelCase keys, matching the JSON documents the
//! store persists.

mod draft;
mod error;
mod patch;
mod series;
mod sermon;

pub use draft::SermonDraft;
pub use error::{ModelError, ModelResult};
pub use patch::SermonPatch;
pub use series::{NewSeries, SermonSeries, DEFAULT_SERIES_COLOR};
pub use sermon::{
    Block, NewSermon, PopulatedSermon, SectionKind, Sermon, SermonBody, SermonSection,
};
