//! Per-view state with sequence-numbered batches.
//!
//! Every fetch takes a [`LoadingGuard`] from its view's [`ViewCell`]. The
//! guard carries the sequence number of its batch; only the most recently
//! issued batch may write the view's state. Older batches settle as
//! [`Settled::Stale`] and are dropped. The guard also clears the loading
//! flag when it goes out of scope, whatever path the fetch took.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use mlboard_core::types::Timestamp;

use super::ViewError;

/// Observable state of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub loading: bool,
    /// User-facing message of the last failure; at most one per view.
    pub error: Option<String>,
    pub data: Option<T>,
    pub loaded_at: Option<Timestamp>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
            loaded_at: None,
        }
    }
}

/// How a batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    Failed,
    /// A newer batch was issued meanwhile; the result was discarded.
    Stale,
}

#[derive(Debug)]
struct Inner<T> {
    state: ViewState<T>,
    /// Sequence number of the most recently issued batch.
    latest: u64,
}

/// Owned, lock-protected state of a view.
///
/// The lock is only taken for short synchronous sections and is never
/// held across an `.await`.
#[derive(Debug)]
pub struct ViewCell<T> {
    view: &'static str,
    /// Message shown for any request or payload failure.
    failure_message: &'static str,
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> ViewCell<T> {
    pub fn new(view: &'static str, failure_message: &'static str) -> Self {
        Self {
            view,
            failure_message,
            inner: Mutex::new(Inner {
                state: ViewState::default(),
                latest: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.lock().state.clone()
    }

    /// Start a new batch: raise the loading flag, clear the previous error
    /// and supersede any batch still in flight.
    pub fn begin(&self) -> LoadingGuard<'_, T> {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.state.loading = true;
        inner.state.error = None;
        let seq = inner.latest;
        tracing::debug!(view = self.view, seq, "Batch started");
        LoadingGuard { cell: self, seq }
    }

    /// Record a failure detected before any request was issued. Supersedes
    /// in-flight batches so their results cannot overwrite the message.
    pub fn fail_local(&self, err: ViewError) -> Settled {
        let message = err.user_message(self.failure_message);
        tracing::info!(view = self.view, error = %err, "Rejected locally");
        let mut inner = self.lock();
        inner.latest += 1;
        inner.state = ViewState {
            error: Some(message),
            ..ViewState::default()
        };
        Settled::Failed
    }

    /// Mutate loaded data in place. Returns `None` when nothing is loaded.
    pub fn with_data_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.lock().state.data.as_mut().map(f)
    }

    /// Drop all state and discard any batch still in flight.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.state = ViewState::default();
    }
}

/// Ticket for one in-flight batch.
#[must_use = "dropping the guard immediately clears the loading flag"]
pub struct LoadingGuard<'a, T: Clone> {
    cell: &'a ViewCell<T>,
    seq: u64,
}

impl<T: Clone> LoadingGuard<'_, T> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Write the batch outcome if this batch is still the latest one.
    ///
    /// Success replaces the data and stamps `loaded_at`. Failure clears
    /// the data and leaves exactly one user-facing message.
    pub fn settle(self, result: Result<T, ViewError>) -> Settled {
        let cell = self.cell;
        let mut inner = cell.lock();
        if inner.latest != self.seq {
            tracing::debug!(
                view = cell.view,
                seq = self.seq,
                latest = inner.latest,
                "Discarding stale batch"
            );
            return Settled::Stale;
        }

        inner.state.loading = false;
        match result {
            Ok(data) => {
                inner.state.data = Some(data);
                inner.state.error = None;
                inner.state.loaded_at = Some(Utc::now());
                tracing::info!(view = cell.view, seq = self.seq, "View loaded");
                Settled::Applied
            }
            Err(e) => {
                tracing::warn!(view = cell.view, seq = self.seq, error = %e, "View load failed");
                inner.state.data = None;
                inner.state.loaded_at = None;
                inner.state.error = Some(e.user_message(cell.failure_message));
                Settled::Failed
            }
        }
    }
}

impl<T: Clone> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        let mut inner = self.cell.lock();
        if inner.latest == self.seq {
            inner.state.loading = false;
        }
    }
}
