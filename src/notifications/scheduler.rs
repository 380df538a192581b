// SPDX-License-Identifier: MPL-2.0
//! Cancellable expiry timers.
//!
//! Each scheduled expiry runs as a tokio task that sleeps for the requested
//! delay and then invokes its callback. Pending tasks are tracked by toast id
//! so a dismissal can abort them deterministically.
//!
//! A task that already woke up re-checks its registration before firing:
//! if `cancel` removed it in the meantime, the callback is skipped.

use crate::domain::toast::ToastId;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::Instant;

#[derive(Debug)]
struct PendingExpiry {
    token: u64,
    handle: AbortHandle,
}

#[derive(Debug, Default)]
struct Registry {
    pending: HashMap<ToastId, Vec<PendingExpiry>>,
    next_token: u64,
}

impl Registry {
    /// Removes the registration `token` for `id`. Returns false if it was
    /// already cancelled.
    fn take(&mut self, id: ToastId, token: u64) -> bool {
        let Some(entries) = self.pending.get_mut(&id) else {
            return false;
        };
        let Some(pos) = entries.iter().position(|e| e.token == token) else {
            return false;
        };
        entries.swap_remove(pos);
        if entries.is_empty() {
            self.pending.remove(&id);
        }
        true
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Schedules removal callbacks for toasts.
#[derive(Debug)]
pub struct ExpiryScheduler {
    runtime: Handle,
    registry: Arc<Mutex<Registry>>,
}

impl ExpiryScheduler {
    /// Creates a scheduler whose timers run on `runtime`.
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    /// Creates a scheduler on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a tokio runtime.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| Error::NoRuntime)
    }

    /// Returns the runtime timers are spawned on.
    #[must_use]
    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// Invokes `on_expire(id)` once after `delay`, unless cancelled first.
    ///
    /// A zero delay schedules nothing. Several schedules for the same id are
    /// independent of each other.
    pub fn schedule<F>(&self, id: ToastId, delay: Duration, on_expire: F)
    where
        F: FnOnce(ToastId) + Send + 'static,
    {
        if delay.is_zero() {
            return;
        }

        // The deadline counts from scheduling, not from the task's first poll.
        let deadline = Instant::now() + delay;

        // Hold the lock across the spawn so the task cannot look itself up
        // before it is registered.
        let mut registry = lock(&self.registry);
        let token = registry.next_token;
        registry.next_token += 1;

        let shared = Arc::clone(&self.registry);
        let task = self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let still_pending = lock(&shared).take(id, token);
            if still_pending {
                tracing::trace!(%id, "Expiry timer fired");
                on_expire(id);
            }
        });

        registry.pending.entry(id).or_default().push(PendingExpiry {
            token,
            handle: task.abort_handle(),
        });
        tracing::trace!(%id, ?delay, "Scheduled expiry");
    }

    /// Cancels every pending expiry for `id`. No-op if none is pending.
    pub fn cancel(&self, id: ToastId) {
        if let Some(entries) = lock(&self.registry).pending.remove(&id) {
            for entry in entries {
                entry.handle.abort();
            }
            tracing::trace!(%id, "Cancelled expiry");
        }
    }

    /// Cancels every pending expiry.
    pub fn cancel_all(&self) {
        let drained: Vec<_> = lock(&self.registry).pending.drain().collect();
        for (_, entries) in drained {
            for entry in entries {
                entry.handle.abort();
            }
        }
    }

    /// Returns true if an expiry is pending for `id`.
    #[must_use]
    pub fn pending(&self, id: ToastId) -> bool {
        lock(&self.registry).pending.contains_key(&id)
    }

    /// Returns the number of pending expiries across all ids.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        lock(&self.registry).pending.values().map(Vec::len).sum()
    }
}

impl Drop for ExpiryScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(ToastId) + Send + Clone + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&count);
        (count, move |_: ToastId| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn current_outside_runtime_is_an_error() {
        assert!(matches!(ExpiryScheduler::current(), Err(Error::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let scheduler = ExpiryScheduler::current().expect("runtime");
        let (count, on_expire) = counter();
        let id = ToastId::next();

        scheduler.schedule(id, Duration::from_millis(100), on_expire);
        assert!(scheduler.pending(id));

        tokio::time::advance(Duration::from_millis(99)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!scheduler.pending(id));

        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_counts_from_schedule_not_first_poll() {
        let scheduler = ExpiryScheduler::current().expect("runtime");
        let (count, on_expire) = counter();
        let id = ToastId::next();

        // The clock moves the full delay before the task is ever polled.
        scheduler.schedule(id, Duration::from_millis(100), on_expire);
        tokio::time::advance(Duration::from_millis(100)).await;
        settle().await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!scheduler.pending(id));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_schedules_nothing() {
        let scheduler = ExpiryScheduler::current().expect("runtime");
        let (count, on_expire) = counter();

        scheduler.schedule(ToastId::next(), Duration::ZERO, on_expire);

        assert_eq!(scheduler.pending_count(), 0);
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_firing() {
        let scheduler = ExpiryScheduler::current().expect("runtime");
        let (count, on_expire) = counter();
        let id = ToastId::next();

        scheduler.schedule(id, Duration::from_millis(50), on_expire);
        scheduler.cancel(id);
        // Cancelling twice, or an unknown id, is harmless.
        scheduler.cancel(id);
        scheduler.cancel(ToastId::next());

        tokio::time::advance(Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn schedules_for_same_id_are_independent() {
        let scheduler = ExpiryScheduler::current().expect("runtime");
        let (count, on_expire) = counter();
        let id = ToastId::next();

        scheduler.schedule(id, Duration::from_millis(10), on_expire.clone());
        scheduler.schedule(id, Duration::from_millis(20), on_expire);
        assert_eq!(scheduler.pending_count(), 2);

        tokio::time::advance(Duration::from_millis(10)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(scheduler.pending(id));

        tokio::time::advance(Duration::from_millis(10)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_clears_every_id() {
        let scheduler = ExpiryScheduler::current().expect("runtime");
        let (count, on_expire) = counter();

        for _ in 0..3 {
            scheduler.schedule(ToastId::next(), Duration::from_millis(10), on_expire.clone());
        }
        scheduler.cancel_all();

        assert_eq!(scheduler.pending_count(), 0);
        tokio::time::advance(Duration::from_millis(50)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
