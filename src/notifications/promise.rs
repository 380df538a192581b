// SPDX-License-Identifier: MPL-2.0
//! Tracks an asynchronous operation with a single toast.
//!
//! The toast starts as `loading` and is pinned. When the operation settles,
//! exactly one of the success or failure branches morphs it in place. The
//! operation runs on its own task, so both outcomes are observed even if the
//! caller drops the returned handle.

use super::notification::{PromiseMessages, ToastDraft, ToastKind};
use super::store::ToastStore;
use crate::domain::toast::{OperationId, ToastDuration};
use crate::error::Result;
use futures_util::{FutureExt, TryFuture, TryFutureExt};
use std::panic::AssertUnwindSafe;
use tokio::task::JoinHandle;

/// Handle to a tracked operation. Awaiting it yields the operation's own
/// result; a panic inside the operation resurfaces as a panicked
/// [`JoinError`](tokio::task::JoinError).
pub type Tracked<T, E> = JoinHandle<std::result::Result<T, E>>;

/// Raises a loading toast for `operation` and settles it when the
/// operation completes.
///
/// With `settled_duration`, the settled toast is removed after that delay;
/// otherwise it stays until dismissed.
///
/// # Errors
///
/// Returns [`Error::StoreClosed`](crate::error::Error::StoreClosed) if the
/// store was shut down. The operation is not started in that case.
pub fn track<Fut>(
    store: &ToastStore,
    operation: Fut,
    messages: PromiseMessages,
    settled_duration: Option<ToastDuration>,
) -> Result<Tracked<Fut::Ok, Fut::Error>>
where
    Fut: TryFuture + Send + 'static,
    Fut::Ok: Send + 'static,
    Fut::Error: Send + 'static,
{
    let PromiseMessages {
        loading,
        success,
        error,
    } = messages;
    let operation_id = OperationId::next();
    let toast_id = store.add(
        ToastDraft::new(ToastKind::Loading, loading)
            .with_duration(ToastDuration::PINNED)
            .linked_to(operation_id),
    )?;
    tracing::debug!(%operation_id, %toast_id, "Tracking operation");

    let weak = store.downgrade();
    let task = store.runtime().spawn(async move {
        let outcome = AssertUnwindSafe(TryFutureExt::into_future(operation))
            .catch_unwind()
            .await;

        let (kind, message) = match &outcome {
            Ok(Ok(_)) => (ToastKind::Success, success),
            Ok(Err(_)) | Err(_) => (ToastKind::Error, error),
        };
        if let Some(store) = weak.upgrade() {
            store.update_promise(operation_id, kind, message);
            if let Some(duration) = settled_duration {
                store.schedule_removal(toast_id, duration);
            }
        }

        match outcome {
            Ok(result) => result,
            Err(panic) => {
                tracing::warn!(%operation_id, "Tracked operation panicked");
                std::panic::resume_unwind(panic)
            }
        }
    });

    Ok(task)
}
