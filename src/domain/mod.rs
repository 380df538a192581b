// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value objects with no runtime dependencies.
//!
//! # Modules
//!
//! - [`toast`]: Toast types ([`ToastId`](toast::ToastId),
//!   [`MaxToasts`](toast::MaxToasts), [`ToastDuration`](toast::ToastDuration),
//!   [`Position`](toast::Position))

pub mod toast;
