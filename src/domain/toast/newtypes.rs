// SPDX-License-Identifier: MPL-2.0
//! Toast newtypes.
//!
//! This module provides type-safe wrappers for toast values, ensuring
//! identifiers are never reused and limits are always within valid ranges.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier for a toast.
///
/// Identifiers come from a process-wide monotonic counter and are never
/// reused, even after the toast is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    #[must_use]
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Correlates a toast with an in-flight asynchronous operation.
///
/// Drawn from a counter separate from [`ToastId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationId(u64);

impl OperationId {
    /// Creates a new unique operation ID.
    #[must_use]
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op-{}", self.0)
    }
}

// =============================================================================
// Max Toasts Bounds
// =============================================================================

/// Queue capacity bounds. There is no upper limit.
pub mod max_toasts_bounds {
    /// Minimum number of active toasts.
    pub const MIN: usize = 1;
    /// Default number of active toasts.
    pub const DEFAULT: usize = 5;
}

// =============================================================================
// MaxToasts
// =============================================================================

/// Maximum number of simultaneously active toasts.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always at least one.
///
/// # Example
///
/// ```
/// use quick_notify::domain::toast::MaxToasts;
///
/// assert_eq!(MaxToasts::new(3).value(), 3);
///
/// // Zero is raised to the minimum
/// assert_eq!(MaxToasts::new(0).value(), 1);
/// assert_eq!(MaxToasts::new(150).value(), 150);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxToasts(usize);

impl MaxToasts {
    /// Creates a new capacity, raising zero to the minimum.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.max(max_toasts_bounds::MIN))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for MaxToasts {
    fn default() -> Self {
        Self(max_toasts_bounds::DEFAULT)
    }
}

// =============================================================================
// ToastDuration
// =============================================================================

/// Default auto-dismiss duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Lifetime of a toast in milliseconds. Zero pins the toast until it is
/// dismissed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToastDuration(u64);

impl ToastDuration {
    /// A duration that never expires.
    pub const PINNED: Self = Self(0);

    /// Creates a duration from milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the duration as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true if the toast never auto-expires.
    #[must_use]
    pub fn is_pinned(self) -> bool {
        self.0 == 0
    }
}

impl Default for ToastDuration {
    fn default() -> Self {
        Self(DEFAULT_DURATION_MS)
    }
}

/// Rounds down to whole milliseconds, except that a non-zero duration never
/// becomes [`ToastDuration::PINNED`].
impl From<Duration> for ToastDuration {
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            return Self::PINNED;
        }
        Self(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX).max(1))
    }
}

// =============================================================================
// Position
// =============================================================================

/// Screen placement of the toast stack, consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Returns the kebab-case name used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }

    /// Returns true for the three top placements.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopCenter | Position::TopRight
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown position name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPosition(pub String);

impl fmt::Display for UnknownPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown toast position '{}'", self.0)
    }
}

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPosition(s.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
