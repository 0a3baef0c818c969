//! The autosave controller: snapshot, dirty tracking, debounce and save path.

use crate::config::AutoSaveConfig;
use crate::error::{AutoSaveError, AutoSaveResult};
use crate::handler::{SaveHandler, SaveObserver};
use crate::status::{SaveOutcome, SaveState, SaveStatus, SkipReason};
use crate::timer::TimerSlot;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// A value the controller can track.
///
/// `Clone` is the deep copy taken for the snapshot, `PartialEq` the
/// structural comparison that decides dirtiness.
pub trait EditableValue: Clone + PartialEq + Send + Sync + 'static {}

impl<T> EditableValue for T where T: Clone + PartialEq + Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Debounce,
    Manual,
}

struct State<T> {
    /// The caller's latest value.
    current: T,
    /// Last value known to be persisted.
    snapshot: T,
    status: SaveStatus,
    /// A handler call is outstanding. Survives `reset`, which only changes
    /// what is displayed.
    in_flight: bool,
    enabled: bool,
    alive: bool,
    /// Bumped by `reset` and `shutdown`; saves started under an older epoch
    /// do not write back.
    epoch: u64,
    debounce: TimerSlot,
    revert: TimerSlot,
}

impl<T: PartialEq> State<T> {
    fn is_dirty(&self) -> bool {
        self.current != self.snapshot
    }

    fn save_state(&self) -> SaveState {
        SaveState {
            status: self.status,
            is_dirty: self.is_dirty(),
        }
    }

    fn skip_reason(&self) -> Option<SkipReason> {
        if !self.enabled {
            Some(SkipReason::Disabled)
        } else if self.in_flight {
            Some(SkipReason::InFlight)
        } else if !self.is_dirty() {
            Some(SkipReason::Clean)
        } else {
            None
        }
    }
}

struct Inner<T: EditableValue, H: SaveHandler<T>> {
    handler: H,
    config: AutoSaveConfig,
    state: Mutex<State<T>>,
    observers: RwLock<Vec<Arc<dyn SaveObserver<H::Response>>>>,
    state_tx: watch::Sender<SaveState>,
}

impl<T: EditableValue, H: SaveHandler<T>> Inner<T, H> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn observers(&self) -> Vec<Arc<dyn SaveObserver<H::Response>>> {
        self.observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, state: &State<T>) {
        let next = state.save_state();
        self.state_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    /// (Re)starts the quiet-period timer. Must be called with the state lock held.
    fn arm_debounce(self: &Arc<Self>, state: &mut State<T>) {
        let generation = state.debounce.rearm();
        let Ok(runtime) = Handle::try_current() else {
            warn!("no Tokio runtime; automatic save not scheduled");
            return;
        };
        let weak = Arc::downgrade(self);
        let delay = self.config.interval();

        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let claimed = inner.lock().debounce.claim(generation);
            if !claimed {
                return;
            }
            // Failures are already reported through status and observers.
            let _ = inner.run_save(Trigger::Debounce).await;
        });
        state.debounce.set(handle);
    }

    /// Schedules the `Saved` → `Idle` transition.
    fn arm_revert(self: &Arc<Self>, state: &mut State<T>) {
        let generation = state.revert.rearm();
        let Ok(runtime) = Handle::try_current() else {
            return;
        };
        let weak = Arc::downgrade(self);
        let delay = self.config.saved_display();

        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut state = inner.lock();
            if state.revert.claim(generation) && state.status == SaveStatus::Saved {
                state.status = SaveStatus::Idle;
                inner.publish(&state);
            }
        });
        state.revert.set(handle);
    }

    async fn run_save(
        self: &Arc<Self>,
        trigger: Trigger,
    ) -> AutoSaveResult<SaveOutcome<H::Response>> {
        // The payload is captured once, together with the switch to `Saving`.
        let (value, epoch) = {
            let mut state = self.lock();
            if !state.alive {
                return Err(AutoSaveError::ShutDown);
            }
            if let Some(reason) = state.skip_reason() {
                debug!(?trigger, %reason, "save skipped");
                return Ok(SaveOutcome::Skipped(reason));
            }
            state.debounce.cancel();
            state.revert.cancel();
            state.status = SaveStatus::Saving;
            state.in_flight = true;
            self.publish(&state);
            (state.current.clone(), state.epoch)
        };

        debug!(?trigger, "saving");
        let result = self.handler.save(&value).await;

        let mut state = self.lock();
        state.in_flight = false;
        if !state.alive || state.epoch != epoch {
            debug!(?trigger, "save resolved after reset or shutdown, state left unchanged");
            // Edits made after the reset may have had their timer skipped.
            if state.alive && state.enabled && state.is_dirty() && !state.debounce.is_armed() {
                self.arm_debounce(&mut state);
            }
            return result
                .map(SaveOutcome::Saved)
                .map_err(AutoSaveError::save_failed);
        }

        match result {
            Ok(response) => {
                // The snapshot is what was submitted, not what the caller holds now.
                state.snapshot = value;
                if state.is_dirty() {
                    // Edits arrived while saving; there is nothing to show as saved.
                    state.status = SaveStatus::Idle;
                    if state.enabled {
                        debug!("value changed while saving, re-arming debounce");
                        self.arm_debounce(&mut state);
                    }
                } else {
                    state.status = SaveStatus::Saved;
                    self.arm_revert(&mut state);
                }
                self.publish(&state);
                drop(state);

                info!(?trigger, "saved");
                for observer in self.observers() {
                    observer.on_success(&response);
                }
                Ok(SaveOutcome::Saved(response))
            }
            Err(e) => {
                state.status = SaveStatus::Error;
                self.publish(&state);
                drop(state);

                let error = AutoSaveError::save_failed(e);
                warn!(?trigger, "{error}");
                for observer in self.observers() {
                    observer.on_error(&error);
                }
                Err(error)
            }
        }
    }
}

/// Tracks a caller-owned value and persists it after edits go quiet.
///
/// One controller serves one editing session. Timers run on the ambient Tokio
/// runtime; they are cancelled when the controller is shut down or dropped.
pub struct AutoSaveController<T: EditableValue, H: SaveHandler<T>> {
    inner: Arc<Inner<T, H>>,
}

impl<T: EditableValue, H: SaveHandler<T>> AutoSaveController<T, H> {
    /// Creates a controller whose snapshot is `initial`.
    pub fn new(initial: T, handler: H, config: AutoSaveConfig) -> Self {
        let state = State {
            current: initial.clone(),
            snapshot: initial,
            status: SaveStatus::Idle,
            in_flight: false,
            enabled: config.enabled,
            alive: true,
            epoch: 0,
            debounce: TimerSlot::default(),
            revert: TimerSlot::default(),
        };
        let (state_tx, _) = watch::channel(state.save_state());

        Self {
            inner: Arc::new(Inner {
                handler,
                config,
                state: Mutex::new(state),
                observers: RwLock::new(Vec::new()),
                state_tx,
            }),
        }
    }

    /// Registers an observer for save results.
    pub fn add_observer(&self, observer: Arc<dyn SaveObserver<H::Response>>) {
        self.inner
            .observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    /// Supplies the caller's latest value.
    ///
    /// A value unequal to the snapshot re-arms the debounce timer (when
    /// enabled) and clears a lingering `Saved`. A value equal to the snapshot
    /// cancels any pending automatic save.
    pub fn update(&self, value: T) {
        let mut state = self.inner.lock();
        if !state.alive {
            debug!("update after shutdown ignored");
            return;
        }
        state.current = value;

        if state.is_dirty() {
            if state.status == SaveStatus::Saved {
                state.status = SaveStatus::Idle;
                state.revert.cancel();
            }
            if state.enabled {
                self.inner.arm_debounce(&mut state);
            }
        } else {
            state.debounce.cancel();
        }
        self.inner.publish(&state);
    }

    /// Saves now, skipping the quiet period.
    ///
    /// Resolves to [`SaveOutcome::Skipped`] without calling the handler when
    /// the value is clean, a save is in flight, or the controller is disabled.
    pub async fn manual_save(&self) -> AutoSaveResult<SaveOutcome<H::Response>> {
        self.inner.run_save(Trigger::Manual).await
    }

    /// Replaces the snapshot with freshly loaded data.
    ///
    /// The value becomes both snapshot and current value, so it is clean and
    /// the status is `Idle`. A save still in flight will not write back.
    pub fn reset(&self, value: T) {
        let mut state = self.inner.lock();
        if !state.alive {
            return;
        }
        state.snapshot = value.clone();
        state.current = value;
        state.status = SaveStatus::Idle;
        state.epoch = state.epoch.wrapping_add(1);
        state.debounce.cancel();
        state.revert.cancel();
        self.inner.publish(&state);
        debug!("auto-save baseline reset");
    }

    /// Turns automatic saving on or off.
    ///
    /// Disabling cancels a pending automatic save but not one in flight.
    pub fn set_enabled(&self, enabled: bool) {
        let mut state = self.inner.lock();
        if !state.alive || state.enabled == enabled {
            return;
        }
        state.enabled = enabled;
        if !enabled {
            state.debounce.cancel();
        } else if state.is_dirty() {
            self.inner.arm_debounce(&mut state);
        }
        debug!(enabled, "auto-save toggled");
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.lock().enabled
    }

    /// True iff the current value differs from the snapshot.
    pub fn is_dirty(&self) -> bool {
        self.inner.lock().is_dirty()
    }

    pub fn status(&self) -> SaveStatus {
        self.inner.lock().status
    }

    /// Status and dirty flag read together.
    pub fn state(&self) -> SaveState {
        self.inner.lock().save_state()
    }

    /// Subscribes to status / dirty changes.
    pub fn subscribe(&self) -> watch::Receiver<SaveState> {
        self.inner.state_tx.subscribe()
    }

    /// A copy of the last persisted value.
    pub fn snapshot(&self) -> T {
        self.inner.lock().snapshot.clone()
    }

    /// A copy of the latest value supplied by the caller.
    pub fn current(&self) -> T {
        self.inner.lock().current.clone()
    }

    /// Whether an automatic save is waiting for its quiet period.
    pub fn has_pending_save(&self) -> bool {
        self.inner.lock().debounce.is_armed()
    }

    pub fn config(&self) -> &AutoSaveConfig {
        &self.inner.config
    }

    pub fn handler(&self) -> &H {
        &self.inner.handler
    }

    /// Cancels timers and detaches from any save in flight.
    ///
    /// Later calls to `update`, `reset` and `set_enabled` are ignored and
    /// `manual_save` returns [`AutoSaveError::ShutDown`].
    pub fn shutdown(&self) {
        let mut state = self.inner.lock();
        if !state.alive {
            return;
        }
        state.alive = false;
        state.epoch = state.epoch.wrapping_add(1);
        state.debounce.cancel();
        state.revert.cancel();
        debug!("auto-save controller shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        !self.inner.lock().alive
    }
}

impl<T: EditableValue, H: SaveHandler<T>> Drop for AutoSaveController<T, H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
