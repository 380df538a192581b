// SPDX-License-Identifier: MPL-2.0
//! Toast domain types.
//!
//! Value objects shared by the queue store, the scheduler and the
//! configuration layer. They are independent of any presentation framework.

pub mod newtypes;

// Re-export commonly used types
pub use newtypes::{
    max_toasts_bounds, MaxToasts, OperationId, Position, ToastDuration, ToastId, UnknownPosition,
    DEFAULT_DURATION_MS,
};
