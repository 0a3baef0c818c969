//! Autosave configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning for an [`AutoSaveController`](crate::AutoSaveController).
///
/// Call sites pick their own interval: short for lightweight fields, longer
/// where a save is expensive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSaveConfig {
    /// Quiet period after the last edit before an automatic save (ms).
    pub interval_ms: u64,
    /// How long `Saved` is shown before falling back to `Idle` (ms).
    pub saved_display_ms: u64,
    /// Whether automatic saving starts enabled.
    pub enabled: bool,
}

impl AutoSaveConfig {
    /// Default debounce interval (2.5 seconds).
    pub const DEFAULT_INTERVAL_MS: u64 = 2_500;

    /// Default time the `Saved` status stays up (2 seconds).
    pub const DEFAULT_SAVED_DISPLAY_MS: u64 = 2_000;

    /// Returns the debounce interval.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Returns the saved-status display time.
    pub fn saved_display(&self) -> Duration {
        Duration::from_millis(self.saved_display_ms)
    }

    /// Sets the debounce interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval_ms = interval.as_millis() as u64;
        self
    }

    /// Sets the saved-status display time.
    #[must_use]
    pub fn with_saved_display(mut self, delay: Duration) -> Self {
        self.saved_display_ms = delay.as_millis() as u64;
        self
    }

    /// Starts the controller disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            interval_ms: Self::DEFAULT_INTERVAL_MS,
            saved_display_ms: Self::DEFAULT_SAVED_DISPLAY_MS,
            enabled: true,
        }
    }
}
