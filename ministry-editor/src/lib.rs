//! Sermon editing sessions for Ministry Suite.
//!
//! Connects the record-agnostic autosave controller to the sermon store:
//! - [`StoreSaveHandler`] persists a [`SermonDraft`](ministry_model::SermonDraft)
//!   as a whitelisted patch and returns the re-joined sermon
//! - [`SermonEditor`] owns the draft, the controller and the latest server copy

mod editor;
mod error;
mod handler;

pub use editor::SermonEditor;
pub use error::{EditorError, EditorResult};
pub use handler::StoreSaveHandler;
