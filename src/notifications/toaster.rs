// SPDX-License-Identifier: MPL-2.0
//! Application-facing producer API.
//!
//! A `Toaster` closes over an explicit [`ToastStore`] and offers one-call
//! helpers for each toast kind, promise tracking, dismissal and clearing.

use super::notification::{PromiseMessages, Toast, ToastDraft, ToastKind};
use super::promise::{self, Tracked};
use super::store::ToastStore;
use crate::domain::toast::{ToastDuration, ToastId};
use crate::error::{Error, Result};
use futures_util::TryFuture;

/// Cheaply cloneable producer handle.
#[derive(Debug, Clone)]
pub struct Toaster {
    store: ToastStore,
}

impl Toaster {
    #[must_use]
    pub fn new(store: ToastStore) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &ToastStore {
        &self.store
    }

    pub fn success(&self, message: impl Into<String>) -> Result<ToastId> {
        self.custom(ToastKind::Success, message, None)
    }

    pub fn error(&self, message: impl Into<String>) -> Result<ToastId> {
        self.custom(ToastKind::Error, message, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> Result<ToastId> {
        self.custom(ToastKind::Warning, message, None)
    }

    pub fn info(&self, message: impl Into<String>) -> Result<ToastId> {
        self.custom(ToastKind::Info, message, None)
    }

    /// Success toast with its own lifetime.
    pub fn success_for(
        &self,
        message: impl Into<String>,
        duration: impl Into<ToastDuration>,
    ) -> Result<ToastId> {
        self.custom(ToastKind::Success, message, Some(duration.into()))
    }

    pub fn error_for(
        &self,
        message: impl Into<String>,
        duration: impl Into<ToastDuration>,
    ) -> Result<ToastId> {
        self.custom(ToastKind::Error, message, Some(duration.into()))
    }

    pub fn warning_for(
        &self,
        message: impl Into<String>,
        duration: impl Into<ToastDuration>,
    ) -> Result<ToastId> {
        self.custom(ToastKind::Warning, message, Some(duration.into()))
    }

    pub fn info_for(
        &self,
        message: impl Into<String>,
        duration: impl Into<ToastDuration>,
    ) -> Result<ToastId> {
        self.custom(ToastKind::Info, message, Some(duration.into()))
    }

    /// Raises a toast of any kind. `None` uses the store's default duration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreClosed`] after the store was shut down.
    pub fn custom(
        &self,
        kind: ToastKind,
        message: impl Into<String>,
        duration: Option<ToastDuration>,
    ) -> Result<ToastId> {
        self.show(ToastDraft::new(kind, message).with_optional_duration(duration))
    }

    /// Raises a fully built draft (title, action, ...).
    pub fn show(&self, draft: ToastDraft) -> Result<ToastId> {
        self.store.add(draft)
    }

    /// Tracks `operation` with a loading toast that turns into a success or
    /// error toast when it settles. See [`promise::track`].
    pub fn promise<Fut>(
        &self,
        operation: Fut,
        messages: PromiseMessages,
        settled_duration: Option<ToastDuration>,
    ) -> Result<Tracked<Fut::Ok, Fut::Error>>
    where
        Fut: TryFuture + Send + 'static,
        Fut::Ok: Send + 'static,
        Fut::Error: Send + 'static,
    {
        promise::track(&self.store, operation, messages, settled_duration)
    }

    /// Dismisses a toast. Returns `Ok(false)` if it was already gone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreClosed`] after the store was shut down.
    pub fn dismiss(&self, id: ToastId) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.store.remove(id))
    }

    /// Dismisses every toast.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreClosed`] after the store was shut down.
    pub fn clear(&self) -> Result<()> {
        self.ensure_open()?;
        self.store.clear();
        Ok(())
    }

    /// Returns the live toasts in display order.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.store.visible()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.store.is_closed() {
            Err(Error::StoreClosed)
        } else {
            Ok(())
        }
    }
}

impl ToastStore {
    /// Returns a producer handle for this store.
    #[must_use]
    pub fn toaster(&self) -> Toaster {
        Toaster::new(self.clone())
    }
}
