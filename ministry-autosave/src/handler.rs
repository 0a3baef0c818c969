//! The persistence seam: save handlers and save observers.

use crate::controller::EditableValue;
use crate::error::AutoSaveError;
use async_trait::async_trait;
use std::future::Future;

/// Persists a value on behalf of the controller.
///
/// The controller knows nothing about how or where the value goes (HTTP,
/// a database, a file). It only awaits the result.
#[async_trait]
pub trait SaveHandler<T: EditableValue>: Send + Sync + 'static {
    /// What a successful save returns (e.g. the stored record).
    type Response: Send + Sync + 'static;
    /// Why a save failed.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persists `value`.
    async fn save(&self, value: &T) -> Result<Self::Response, Self::Error>;
}

/// A [`SaveHandler`] built from an async closure. See [`save_fn`].
pub struct FnSaveHandler<F> {
    f: F,
}

/// Wraps an async closure taking an owned copy of the value as a handler.
pub fn save_fn<F>(f: F) -> FnSaveHandler<F> {
    FnSaveHandler { f }
}

#[async_trait]
impl<T, F, Fut, R, E> SaveHandler<T> for FnSaveHandler<F>
where
    T: EditableValue,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + Sync + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    type Response = R;
    type Error = E;

    async fn save(&self, value: &T) -> Result<R, E> {
        (self.f)(value.clone()).await
    }
}

/// Notified after a save resolves.
///
/// Observers run after the controller has updated its own state, outside any
/// lock. They are not called for saves that resolve after shutdown or reset.
pub trait SaveObserver<R>: Send + Sync {
    fn on_success(&self, response: &R) {
        let _ = response;
    }

    fn on_error(&self, error: &AutoSaveError) {
        let _ = error;
    }
}

type SuccessFn<R> = Box<dyn Fn(&R) + Send + Sync>;
type ErrorFn = Box<dyn Fn(&AutoSaveError) + Send + Sync>;

/// An observer assembled from closures.
pub struct CallbackObserver<R> {
    on_success: Option<SuccessFn<R>>,
    on_error: Option<ErrorFn>,
}

impl<R> CallbackObserver<R> {
    pub fn new() -> Self {
        Self {
            on_success: None,
            on_error: None,
        }
    }

    #[must_use]
    pub fn with_success(mut self, f: impl Fn(&R) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_error(mut self, f: impl Fn(&AutoSaveError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }
}

impl<R> Default for CallbackObserver<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SaveObserver<R> for CallbackObserver<R> {
    fn on_success(&self, response: &R) {
        if let Some(f) = &self.on_success {
            f(response);
        }
    }

    fn on_error(&self, error: &AutoSaveError) {
        if let Some(f) = &self.on_error {
            f(error);
        }
    }
}
