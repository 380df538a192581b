// SPDX-License-Identifier: MPL-2.0
//! This module handles the toast configuration, including loading and saving
//! user preferences to a `toasts.toml` file.
//!
//! Options are stored as a flat table of optional fields. Missing fields fall
//! back to the defaults in [`defaults`] when the options are resolved into a
//! [`ToastConfig`].
//!
//! ```toml
//! position = "bottom-right"
//! duration = 4000
//! max_toasts = 3
//! reverse_order = true
//! ```
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `QUICK_NOTIFY_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use quick_notify::config::{self, ToastOptions};
//!
//! let mut options = config::load().unwrap_or_default();
//! options.max_toasts = Some(3);
//! config::save(&options).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::toast::{MaxToasts, Position, ToastDuration};
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "toasts.toml";
const APP_NAME: &str = "QuickNotify";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "QUICK_NOTIFY_CONFIG_DIR";

// =============================================================================
// Options (persisted, partial)
// =============================================================================

/// Recognized configuration options. `None` keeps the built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastOptions {
    /// Placement of the toast stack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Default lifetime in milliseconds (0 = never expire).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    /// Maximum number of active toasts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_toasts: Option<usize>,

    /// Show newest toasts first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_order: Option<bool>,
}

impl ToastOptions {
    /// Overlays the fields set in `other` on top of `self`.
    #[must_use]
    pub fn merge(self, other: ToastOptions) -> Self {
        Self {
            position: other.position.or(self.position),
            duration: other.duration.or(self.duration),
            max_toasts: other.max_toasts.or(self.max_toasts),
            reverse_order: other.reverse_order.or(self.reverse_order),
        }
    }
}

// =============================================================================
// Effective configuration
// =============================================================================

/// Effective configuration of a toast store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastConfig {
    pub position: Position,
    /// Fallback lifetime for toasts that do not set their own.
    pub duration: ToastDuration,
    pub max_toasts: MaxToasts,
    /// When true, the presentation layer shows the newest toast first.
    pub reverse_order: bool,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            duration: ToastDuration::from_millis(DEFAULT_DURATION_MS),
            max_toasts: MaxToasts::new(DEFAULT_MAX_TOASTS),
            reverse_order: DEFAULT_REVERSE_ORDER,
        }
    }
}

impl ToastConfig {
    /// Merges `options` over the built-in defaults.
    #[must_use]
    pub fn from_options(options: &ToastOptions) -> Self {
        let defaults = Self::default();
        Self {
            position: options.position.unwrap_or(defaults.position),
            duration: options
                .duration
                .map_or(defaults.duration, ToastDuration::from_millis),
            max_toasts: options
                .max_toasts
                .map_or(defaults.max_toasts, MaxToasts::new),
            reverse_order: options.reverse_order.unwrap_or(defaults.reverse_order),
        }
    }

    /// Returns the options that reproduce this configuration.
    #[must_use]
    pub fn to_options(&self) -> ToastOptions {
        ToastOptions {
            position: Some(self.position),
            duration: Some(self.duration.as_millis()),
            max_toasts: Some(self.max_toasts.value()),
            reverse_order: Some(self.reverse_order),
        }
    }
}

impl From<ToastOptions> for ToastConfig {
    fn from(options: ToastOptions) -> Self {
        Self::from_options(&options)
    }
}

// =============================================================================
// Serde for domain enums
// =============================================================================

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_default_config_path() -> Option<PathBuf> {
    let dir = std::env::var_os(ENV_CONFIG_DIR)
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|path| path.join(APP_NAME)))?;
    Some(dir.join(CONFIG_FILE))
}

/// Loads options from the default location, or defaults if no file exists.
pub fn load() -> Result<ToastOptions> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(ToastOptions::default())
}

/// Saves options to the default location.
pub fn save(options: &ToastOptions) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(options, &path);
    }
    Ok(())
}

/// Loads options from `path`. Invalid TOML falls back to defaults.
pub fn load_from_path(path: &Path) -> Result<ToastOptions> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(options) => Ok(options),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Ignoring invalid toast config");
            Ok(ToastOptions::default())
        }
    }
}

/// Saves options to `path`, creating parent directories as needed.
pub fn save_to_path(options: &ToastOptions, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(options)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_options_resolve_to_defaults() {
        let config = ToastConfig::from_options(&ToastOptions::default());
        assert_eq!(config, ToastConfig::default());
        assert_eq!(config.position, Position::TopRight);
        assert_eq!(config.duration.as_millis(), 5000);
        assert_eq!(config.max_toasts.value(), 5);
        assert!(!config.reverse_order);
    }

    #[test]
    fn set_options_override_defaults() {
        let config = ToastConfig::from(ToastOptions {
            position: Some(Position::BottomLeft),
            duration: Some(0),
            max_toasts: Some(2),
            reverse_order: Some(true),
        });
        assert_eq!(config.position, Position::BottomLeft);
        assert!(config.duration.is_pinned());
        assert_eq!(config.max_toasts.value(), 2);
        assert!(config.reverse_order);
    }

    #[test]
    fn merge_prefers_the_overlay() {
        let base = ToastOptions {
            duration: Some(1000),
            max_toasts: Some(4),
            ..ToastOptions::default()
        };
        let overlay = ToastOptions {
            max_toasts: Some(2),
            ..ToastOptions::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.duration, Some(1000));
        assert_eq!(merged.max_toasts, Some(2));
    }

    #[test]
    fn save_and_load_round_trip_preserves_options() {
        let options = ToastConfig {
            position: Position::BottomCenter,
            duration: ToastDuration::from_millis(1500),
            max_toasts: MaxToasts::new(3),
            reverse_order: true,
        }
        .to_options();
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&options, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, options);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, ToastOptions::default());
    }

    #[test]
    fn unknown_position_falls_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "position = \"middle\"\n").expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.position.is_none());
    }

    #[test]
    fn load_from_missing_path_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn position_is_written_in_kebab_case() {
        let options = ToastOptions {
            position: Some(Position::BottomRight),
            ..ToastOptions::default()
        };
        let content = toml::to_string(&options).expect("serialize");
        assert!(content.contains("position = \"bottom-right\""));
    }
}
