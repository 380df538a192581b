// SPDX-License-Identifier: MPL-2.0
//! Toast queue lifecycle management.
//!
//! The `ToastStore` is the single source of truth for active toasts and the
//! effective configuration. It caps the queue length, schedules expiry
//! timers and publishes a fresh [`Snapshot`] after every mutation.
//!
//! The store is an explicitly constructed handle; clones share the same
//! queue. Removal races (dismiss after expiry, expiry after clear, update
//! after removal) are no-ops rather than errors.

use super::notification::{Toast, ToastAction, ToastDraft, ToastKind};
use super::scheduler::ExpiryScheduler;
use crate::config::{ToastConfig, ToastOptions};
use crate::domain::toast::{OperationId, ToastDuration, ToastId};
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Point-in-time view of the store, as handed to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Active toasts in arrival order.
    pub toasts: Vec<Toast>,
    pub config: ToastConfig,
}

impl Snapshot {
    /// Iterates toasts in display order: newest first when the
    /// configuration asks for reverse order, arrival order otherwise.
    pub fn visible(&self) -> Box<dyn Iterator<Item = &Toast> + '_> {
        if self.config.reverse_order {
            Box::new(self.toasts.iter().rev())
        } else {
            Box::new(self.toasts.iter())
        }
    }
}

#[derive(Debug)]
struct State {
    toasts: VecDeque<Toast>,
    config: ToastConfig,
    closed: bool,
}

impl State {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            toasts: self.toasts.iter().cloned().collect(),
            config: self.config,
        }
    }

    fn position(&self, id: ToastId) -> Option<usize> {
        self.toasts.iter().position(|t| t.id() == id)
    }
}

#[derive(Debug)]
struct Shared {
    state: Mutex<State>,
    scheduler: ExpiryScheduler,
    snapshots: watch::Sender<Snapshot>,
}

/// Shared handle to a toast queue.
#[derive(Debug, Clone)]
pub struct ToastStore {
    shared: Arc<Shared>,
}

/// Non-owning handle used by timers and tracked operations, so pending
/// work never keeps a torn-down store alive.
#[derive(Debug, Clone)]
pub struct WeakToastStore {
    shared: Weak<Shared>,
}

impl WeakToastStore {
    #[must_use]
    pub fn upgrade(&self) -> Option<ToastStore> {
        self.shared.upgrade().map(|shared| ToastStore { shared })
    }
}

impl ToastStore {
    /// Creates an empty store on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a tokio runtime.
    pub fn new(config: ToastConfig) -> Result<Self> {
        Ok(Self::with_scheduler(config, ExpiryScheduler::current()?))
    }

    /// Creates an empty store by merging `options` over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a tokio runtime.
    pub fn with_options(options: &ToastOptions) -> Result<Self> {
        Self::new(ToastConfig::from_options(options))
    }

    /// Creates an empty store whose timers run on `runtime`.
    #[must_use]
    pub fn with_runtime(config: ToastConfig, runtime: Handle) -> Self {
        Self::with_scheduler(config, ExpiryScheduler::new(runtime))
    }

    fn with_scheduler(config: ToastConfig, scheduler: ExpiryScheduler) -> Self {
        let state = State {
            toasts: VecDeque::with_capacity(config.max_toasts.value()),
            config,
            closed: false,
        };
        let (snapshots, _) = watch::channel(state.snapshot());
        tracing::debug!(?config, "Toast store created");
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                scheduler,
                snapshots,
            }),
        }
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakToastStore {
        WeakToastStore {
            shared: Arc::downgrade(&self.shared),
        }
    }

    pub(crate) fn runtime(&self) -> &Handle {
        self.shared.scheduler.runtime()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State) {
        self.shared.snapshots.send_replace(state.snapshot());
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces the effective configuration with `options` merged over the
    /// built-in defaults.
    ///
    /// Only subsequent [`add`](Self::add) calls see the new values: pending
    /// timers keep their delay and the queue is not trimmed until the next add.
    pub fn configure(&self, options: &ToastOptions) {
        let mut state = self.lock();
        state.config = ToastConfig::from_options(options);
        tracing::debug!(config = ?state.config, "Toast store reconfigured");
        self.publish(&state);
    }

    /// Appends a toast and returns its id.
    ///
    /// If the queue grows past `max_toasts`, the oldest toasts are evicted.
    /// A toast with a non-zero duration is scheduled to expire.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreClosed`] after [`shutdown`](Self::shutdown).
    pub fn add(&self, draft: ToastDraft) -> Result<ToastId> {
        let mut state = self.lock();
        if state.closed {
            return Err(Error::StoreClosed);
        }

        let id = ToastId::next();
        let toast = Toast::from_draft(id, draft, state.config.duration);
        let duration = toast.duration();
        tracing::debug!(%id, kind = %toast.kind(), duration_ms = duration.as_millis(), "Toast added");
        state.toasts.push_back(toast);

        let max = state.config.max_toasts.value();
        while state.toasts.len() > max {
            if let Some(evicted) = state.toasts.pop_front() {
                self.shared.scheduler.cancel(evicted.id());
                tracing::debug!(id = %evicted.id(), "Toast evicted over capacity");
            }
        }

        self.schedule_expiry(id, duration);
        self.publish(&state);
        Ok(id)
    }

    /// Removes the toast with `id`.
    ///
    /// Returns `true` if the toast was found and removed.
    pub fn remove(&self, id: ToastId) -> bool {
        let mut state = self.lock();
        let Some(pos) = state.position(id) else {
            return false;
        };
        state.toasts.remove(pos);
        self.shared.scheduler.cancel(id);
        tracing::debug!(%id, "Toast removed");
        self.publish(&state);
        true
    }

    /// Removes every toast and cancels all pending expiries.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.toasts.clear();
        self.shared.scheduler.cancel_all();
        tracing::debug!("Toasts cleared");
        self.publish(&state);
    }

    /// Morphs the toast linked to `operation` into `kind` with `message`,
    /// keeping its id and its slot in the queue.
    ///
    /// Returns the id of the updated toast, or `None` if no live toast is
    /// linked to the operation.
    pub fn update_promise(
        &self,
        operation: OperationId,
        kind: ToastKind,
        message: impl Into<String>,
    ) -> Option<ToastId> {
        let mut state = self.lock();
        let toast = state
            .toasts
            .iter_mut()
            .find(|t| t.operation() == Some(operation))?;
        toast.settle(kind, message.into());
        let id = toast.id();
        tracing::debug!(%id, %operation, %kind, "Promise toast settled");
        self.publish(&state);
        Some(id)
    }

    /// Schedules removal of a live toast after `duration`.
    ///
    /// No-op if the toast is gone or the duration is zero.
    pub fn schedule_removal(&self, id: ToastId, duration: ToastDuration) {
        let state = self.lock();
        if state.position(id).is_some() {
            self.schedule_expiry(id, duration);
        }
    }

    /// Runs the action callback of a live toast.
    ///
    /// Returns `true` if the toast exists and has an action.
    pub fn trigger(&self, id: ToastId) -> bool {
        // The callback runs outside the lock so it may call back into the store.
        let callback = {
            let state = self.lock();
            state
                .position(id)
                .and_then(|pos| state.toasts[pos].action())
                .map(ToastAction::callback)
        };
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Closes the store: clears the queue, cancels all timers and rejects
    /// further [`add`](Self::add) calls.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        state.closed = true;
        state.toasts.clear();
        self.shared.scheduler.cancel_all();
        tracing::debug!("Toast store shut down");
        self.publish(&state);
    }

    fn schedule_expiry(&self, id: ToastId, duration: ToastDuration) {
        if duration.is_pinned() {
            return;
        }
        let store = self.downgrade();
        self.shared
            .scheduler
            .schedule(id, duration.as_duration(), move |id| {
                if let Some(store) = store.upgrade() {
                    store.expire(id);
                }
            });
    }

    fn expire(&self, id: ToastId) {
        let mut state = self.lock();
        if let Some(pos) = state.position(id) {
            state.toasts.remove(pos);
            tracing::debug!(%id, "Toast expired");
            self.publish(&state);
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns the active toasts in arrival order.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().toasts.iter().cloned().collect()
    }

    /// Returns the active toasts in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<Toast> {
        self.snapshot().visible().cloned().collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Returns a receiver that observes a new snapshot after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.shared.snapshots.subscribe()
    }

    #[must_use]
    pub fn config(&self) -> ToastConfig {
        self.lock().config
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<Toast> {
        let state = self.lock();
        state.position(id).map(|pos| state.toasts[pos].clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().toasts.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Returns the number of expiry timers still pending.
    #[must_use]
    pub fn pending_expiries(&self) -> usize {
        self.shared.scheduler.pending_count()
    }
}
