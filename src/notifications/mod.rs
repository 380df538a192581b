// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! This module provides the in-memory side of a toast/snackbar UX: a bounded
//! queue of transient notifications that expire on their own, plus an
//! adapter that follows an asynchronous operation from loading to its
//! outcome. Rendering is left to the consumer, which reads the ordered list
//! and the configuration.
//!
//! # Components
//!
//! - [`notification`] - `Toast`, `ToastKind` and the `ToastDraft` builder
//! - [`scheduler`] - `ExpiryScheduler`, cancellable expiry timers
//! - [`store`] - `ToastStore`, queueing, eviction and lifecycle management
//! - [`promise`] - loading → success/error tracking of async operations
//! - [`toaster`] - `Toaster`, the producer API used by application code
//!
//! # Usage
//!
//! ```no_run
//! use quick_notify::config::ToastOptions;
//! use quick_notify::notifications::{PromiseMessages, ToastStore};
//!
//! # async fn demo() -> quick_notify::error::Result<()> {
//! let store = ToastStore::with_options(&ToastOptions::default())?;
//! let toast = store.toaster();
//!
//! toast.success("Image saved")?;
//! let upload = toast.promise(
//!     async { Ok::<_, String>(42) },
//!     PromiseMessages::new("Uploading...", "Uploaded", "Upload failed"),
//!     None,
//! )?;
//!
//! for item in store.visible() {
//!     println!("{}: {}", item.kind(), item.message());
//! }
//! # let _ = upload.await;
//! # Ok(())
//! # }
//! ```
//!
//! # Design Considerations
//!
//! - Default lifetime 5s; a duration of 0 keeps the toast until dismissed
//! - At most 5 active toasts by default; the oldest are evicted first
//! - Dismissal cancels the pending timer; late timers are no-ops

pub mod notification;
pub mod promise;
pub mod scheduler;
pub mod store;
pub mod toaster;

pub use notification::{PromiseMessages, Toast, ToastAction, ToastDraft, ToastKind};
pub use promise::{track, Tracked};
pub use scheduler::ExpiryScheduler;
pub use store::{Snapshot, ToastStore, WeakToastStore};
pub use toaster::Toaster;
