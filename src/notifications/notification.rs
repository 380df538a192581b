// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Toast` struct, the `ToastKind` enum and the
//! `ToastDraft` builder used to request a new toast from the store.

use crate::domain::toast::{OperationId, ToastDuration, ToastId};
use std::fmt;
use std::sync::Arc;

/// Kind of a toast. Determines how the presentation layer styles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastKind {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Error,
    /// Something needs attention but did not fail.
    Warning,
    /// Informational message.
    #[default]
    Info,
    /// An asynchronous operation is still running.
    Loading,
}

impl ToastKind {
    /// Returns the lowercase name of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
            ToastKind::Loading => "loading",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback attached to a toast action button.
pub type ActionCallback = Arc<dyn Fn() + Send + Sync>;

/// A labelled action the user can trigger from a toast.
#[derive(Clone)]
pub struct ToastAction {
    label: String,
    callback: ActionCallback,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            callback: Arc::new(callback),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn callback(&self) -> ActionCallback {
        Arc::clone(&self.callback)
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Messages shown over the lifetime of a tracked operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromiseMessages {
    /// Shown while the operation runs.
    pub loading: String,
    /// Replaces the loading message when the operation succeeds.
    pub success: String,
    /// Replaces the loading message when the operation fails.
    pub error: String,
}

impl PromiseMessages {
    pub fn new(
        loading: impl Into<String>,
        success: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
        }
    }
}

/// A toast request that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct ToastDraft {
    kind: ToastKind,
    message: String,
    title: Option<String>,
    duration: Option<ToastDuration>,
    operation: Option<OperationId>,
    action: Option<ToastAction>,
}

impl ToastDraft {
    /// Creates a draft with the given kind and message.
    ///
    /// Without an explicit duration the store's default applies.
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            title: None,
            duration: None,
            operation: None,
            action: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a custom lifetime, overriding the store default.
    /// [`ToastDuration::PINNED`] keeps the toast until dismissed.
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<ToastDuration>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Like [`with_duration`](Self::with_duration), but leaves the default in
    /// place when `duration` is `None`.
    #[must_use]
    pub fn with_optional_duration(mut self, duration: Option<ToastDuration>) -> Self {
        if duration.is_some() {
            self.duration = duration;
        }
        self
    }

    #[must_use]
    pub fn with_action(
        mut self,
        label: impl Into<String>,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.action = Some(ToastAction::new(label, callback));
        self
    }

    /// Links the toast to an asynchronous operation so it can be updated
    /// when the operation settles.
    #[must_use]
    pub fn linked_to(mut self, operation: OperationId) -> Self {
        self.operation = Some(operation);
        self
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn duration(&self) -> Option<ToastDuration> {
        self.duration
    }
}

/// A toast currently held by the store.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    kind: ToastKind,
    message: String,
    title: Option<String>,
    /// Effective lifetime (draft duration or the store default).
    duration: ToastDuration,
    operation: Option<OperationId>,
    action: Option<ToastAction>,
}

impl Toast {
    pub(crate) fn from_draft(id: ToastId, draft: ToastDraft, default: ToastDuration) -> Self {
        Self {
            id,
            kind: draft.kind,
            message: draft.message,
            title: draft.title,
            duration: draft.duration.unwrap_or(default),
            operation: draft.operation,
            action: draft.action,
        }
    }

    pub(crate) fn settle(&mut self, kind: ToastKind, message: String) {
        self.kind = kind;
        self.message = message;
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn duration(&self) -> ToastDuration {
        self.duration
    }

    /// Returns the operation this toast tracks, if any.
    #[must_use]
    pub fn operation(&self) -> Option<OperationId> {
        self.operation
    }

    /// Returns true if this toast was raised by the promise adapter.
    #[must_use]
    pub fn is_promise(&self) -> bool {
        self.operation.is_some()
    }

    #[must_use]
    pub fn action(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }
}
