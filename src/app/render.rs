// SPDX-License-Identifier: MPL-2.0
//! Plain-text rendering of a store snapshot for the terminal demo.

use crate::notifications::{Snapshot, Toast, ToastKind};
use std::fmt::Write;

/// Returns the glyph shown in front of a toast of `kind`.
#[must_use]
pub fn kind_glyph(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "✔",
        ToastKind::Error => "✖",
        ToastKind::Warning => "⚠",
        ToastKind::Info => "ℹ",
        ToastKind::Loading => "…",
    }
}

/// Renders one toast as a single line.
#[must_use]
pub fn render_toast(toast: &Toast) -> String {
    let mut line = format!("{} ", kind_glyph(toast.kind()));
    if let Some(title) = toast.title() {
        let _ = write!(line, "{title}: ");
    }
    line.push_str(toast.message());
    if let Some(action) = toast.action() {
        let _ = write!(line, " [{}]", action.label());
    }
    line
}

/// Renders the whole stack in display order. Top placements put the header
/// above the toasts, bottom placements put it below them.
#[must_use]
pub fn render(snapshot: &Snapshot) -> String {
    let header = format!(
        "── {} ({}/{}) ──",
        snapshot.config.position,
        snapshot.toasts.len(),
        snapshot.config.max_toasts.value()
    );
    let mut lines: Vec<String> = snapshot
        .visible()
        .map(|toast| format!("  {}", render_toast(toast)))
        .collect();
    if lines.is_empty() {
        lines.push("  (empty)".to_string());
    }

    if snapshot.config.position.is_top() {
        lines.insert(0, header);
    } else {
        lines.push(header);
    }
    lines.join("\n")
}
