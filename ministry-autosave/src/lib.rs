//! Debounced autosave for editable records.
//!
//! An [`AutoSaveController`] watches a caller-owned value, compares it with
//! the last value known to be persisted (the snapshot) and persists it through
//! a [`SaveHandler`] once edits go quiet.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──edit──▶ [debounce] ──quiet──▶ Saving ──ok──▶ Saved ──delay──▶ Idle
//!                                         └──err──▶ Error
//! ```
//!
//! - Every [`update`](AutoSaveController::update) that leaves the value unequal
//!   to the snapshot re-arms the debounce timer.
//! - At most one save runs at a time; attempts made while one is in flight are
//!   skipped, not queued.
//! - A failed save leaves the snapshot alone; the next edit or a
//!   [`manual_save`](AutoSaveController::manual_save) retries.
//! - Dropping the controller cancels pending timers. A save already in flight
//!   finishes on its own but no longer touches controller state.
//!
//! # Example
//!
//! ```
//! use ministry_autosave::{save_fn, AutoSaveConfig, AutoSaveController, SaveOutcome};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let handler = save_fn(|title: String| async move {
//!     Ok::<_, std::io::Error>(title.len())
//! });
//! let config = AutoSaveConfig::default();
//! let controller = AutoSaveController::new("Draft".to_string(), handler, config);
//!
//! controller.update("Draft two".to_string());
//! assert!(controller.is_dirty());
//!
//! let outcome = controller.manual_save().await.unwrap();
//! assert!(matches!(outcome, SaveOutcome::Saved(9)));
//! assert!(!controller.is_dirty());
//! # }
//! ```

mod config;
mod controller;
mod error;
mod handler;
mod status;
mod timer;

pub use config::AutoSaveConfig;
pub use controller::{AutoSaveController, EditableValue};
pub use error::{AutoSaveError, AutoSaveResult, BoxError};
pub use handler::{save_fn, CallbackObserver, FnSaveHandler, SaveHandler, SaveObserver};
pub use status::{SaveOutcome, SaveState, SaveStatus, SkipReason};
