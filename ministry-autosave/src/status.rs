//! Save status reported to the UI layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the controller is in its save cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// Nothing in progress.
    #[default]
    Idle,
    /// A save is in flight.
    Saving,
    /// The last save succeeded; reverts to `Idle` after a short delay.
    Saved,
    /// The last save failed; stays until the next save attempt.
    Error,
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Saving => "saving",
            Self::Saved => "saved",
            Self::Error => "error",
        })
    }
}

/// Status plus dirty flag, as published to subscribers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    pub status: SaveStatus,
    pub is_dirty: bool,
}

impl SaveState {
    /// Whether a manual save would do anything right now.
    ///
    /// A save button bound to this is disabled while saving or when clean.
    pub fn can_save(&self) -> bool {
        self.is_dirty && self.status != SaveStatus::Saving
    }
}

impl fmt::Display for SaveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match (self.status, self.is_dirty) {
            (SaveStatus::Saving, _) => "Saving...",
            (SaveStatus::Saved, _) => "Saved",
            (SaveStatus::Error, _) => "Error saving",
            (SaveStatus::Idle, true) => "Unsaved changes",
            (SaveStatus::Idle, false) => "All changes saved",
        })
    }
}

/// Why a save attempt did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The value equals the snapshot.
    Clean,
    /// Another save is still in flight.
    InFlight,
    /// The controller is disabled.
    Disabled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Clean => "no unsaved changes",
            Self::InFlight => "a save is already in progress",
            Self::Disabled => "auto-save is disabled",
        })
    }
}

/// Result of a save attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome<R> {
    /// The handler ran and returned this response.
    Saved(R),
    /// The attempt was a no-op.
    Skipped(SkipReason),
}

impl<R> SaveOutcome<R> {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }

    /// Returns the handler's response, if the handler ran.
    pub fn into_response(self) -> Option<R> {
        match self {
            Self::Saved(response) => Some(response),
            Self::Skipped(_) => None,
        }
    }
}
