// SPDX-License-Identifier: MPL-2.0
//! `quick_notify` is a lightweight toast notification engine.
//!
//! It keeps a bounded queue of transient notifications, expires them on
//! tokio timers, and can follow an asynchronous operation from a loading
//! toast to its success or error outcome. Presentation is left to the
//! consumer.

#![doc(html_root_url = "https://docs.rs/quick_notify/0.3.0")]

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod notifications;
