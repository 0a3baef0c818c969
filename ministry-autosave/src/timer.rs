//! Cancellable one-shot timer slots.

use tokio::task::JoinHandle;

/// Holds at most one pending timer task.
///
/// Every arm or cancel bumps the generation. A task that has already woken
/// must [`claim`](Self::claim) its generation before acting, so a task that
/// lost the race with a cancel does nothing.
#[derive(Debug, Default)]
pub(crate) struct TimerSlot {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl TimerSlot {
    /// Cancels any pending task and returns the generation for the next one.
    pub(crate) fn rearm(&mut self) -> u64 {
        self.cancel();
        self.generation
    }

    /// Stores the task armed for the current generation.
    pub(crate) fn set(&mut self, handle: JoinHandle<()>) {
        self.handle = Some(handle);
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Takes ownership of a fired timer.
    ///
    /// Returns false if the timer was cancelled or re-armed after it was
    /// started. Once claimed the task can no longer be aborted.
    pub(crate) fn claim(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.handle.is_some() {
            self.handle = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn claim_succeeds_once() {
        let mut slot = TimerSlot::default();
        let generation = slot.rearm();
        slot.set(tokio::spawn(async {}));

        assert!(slot.is_armed());
        assert!(slot.claim(generation));
        assert!(!slot.is_armed());
        assert!(!slot.claim(generation));
    }

    #[tokio::test]
    async fn rearm_invalidates_previous_generation() {
        let mut slot = TimerSlot::default();
        let first = slot.rearm();
        slot.set(tokio::spawn(async {}));
        let second = slot.rearm();
        slot.set(tokio::spawn(async {}));

        assert_ne!(first, second);
        assert!(!slot.claim(first));
        assert!(slot.claim(second));
    }

    #[tokio::test]
    async fn cancel_invalidates_pending() {
        let mut slot = TimerSlot::default();
        let generation = slot.rearm();
        slot.set(tokio::spawn(async {}));
        slot.cancel();

        assert!(!slot.is_armed());
        assert!(!slot.claim(generation));
    }
}
