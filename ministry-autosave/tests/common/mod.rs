//! Shared test helpers for autosave tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ministry_autosave::{
    AutoSaveConfig, AutoSaveController, AutoSaveError, EditableValue, SaveHandler, SaveObserver,
};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const INTERVAL: Duration = Duration::from_millis(1_000);
pub const SAVED_DISPLAY: Duration = Duration::from_millis(2_000);

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ministry_autosave=debug")
        .with_test_writer()
        .try_init();
}

pub fn config() -> AutoSaveConfig {
    AutoSaveConfig::default()
        .with_interval(INTERVAL)
        .with_saved_display(SAVED_DISPLAY)
}

/// A save handler that records every payload, optionally waits, and can be
/// told to fail. On success it echoes `response` (or the payload).
pub struct RecordingHandler<T> {
    calls: Mutex<Vec<T>>,
    delay: Duration,
    fail: AtomicBool,
    response: Option<T>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl<T: EditableValue> RecordingHandler<T> {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
            fail: AtomicBool::new(false),
            response: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_response(mut self, response: T) -> Self {
        self.response = Some(response);
        self
    }

    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: EditableValue> SaveHandler<T> for RecordingHandler<T> {
    type Response = T;
    type Error = io::Error;

    async fn save(&self, value: &T) -> Result<T, io::Error> {
        self.calls.lock().unwrap().push(value.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(io::Error::other("server rejected the update"));
        }
        Ok(self.response.clone().unwrap_or_else(|| value.clone()))
    }
}

/// Counts observer callbacks and keeps the last response / error text.
pub struct CountingObserver<R> {
    pub successes: AtomicUsize,
    pub errors: AtomicUsize,
    pub last_response: Mutex<Option<R>>,
    pub last_error: Mutex<Option<String>>,
}

impl<R> CountingObserver<R> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            successes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            last_response: Mutex::new(None),
            last_error: Mutex::new(None),
        })
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

impl<R: Clone + Send + Sync> SaveObserver<R> for CountingObserver<R> {
    fn on_success(&self, response: &R) {
        self.successes.fetch_add(1, Ordering::SeqCst);
        *self.last_response.lock().unwrap() = Some(response.clone());
    }

    fn on_error(&self, error: &AutoSaveError) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        *self.last_error.lock().unwrap() = Some(error.to_string());
    }
}

/// Yields until the controller reports `Saving`.
pub async fn wait_until_saving<T: EditableValue, H: SaveHandler<T>>(
    controller: &AutoSaveController<T, H>,
) {
    while controller.status() != ministry_autosave::SaveStatus::Saving {
        tokio::task::yield_now().await;
    }
}
