// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used when an option is missing from the configuration file.

use crate::domain::toast::{max_toasts_bounds, Position, DEFAULT_DURATION_MS as DOMAIN_DURATION};

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default placement of the toast stack.
pub const DEFAULT_POSITION: Position = Position::TopRight;

/// Default lifetime of a toast that does not set its own (milliseconds).
pub const DEFAULT_DURATION_MS: u64 = DOMAIN_DURATION;

/// Default cap on simultaneously active toasts.
pub const DEFAULT_MAX_TOASTS: usize = max_toasts_bounds::DEFAULT;

/// Default display order (oldest first, newest at the end).
pub const DEFAULT_REVERSE_ORDER: bool = false;

// ==========================================================================
// Promise Defaults
// ==========================================================================

/// Lifetime of a settled promise toast used by the demo (milliseconds).
pub const DEMO_SETTLED_DURATION_MS: u64 = 3000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        assert_eq!(DEFAULT_POSITION, Position::TopRight);
        assert_eq!(DEFAULT_DURATION_MS, 5000);
        assert_eq!(DEFAULT_MAX_TOASTS, 5);
        assert!(!DEFAULT_REVERSE_ORDER);
    }
}
