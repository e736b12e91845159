// SPDX-License-Identifier: MPL-2.0
//! This module handles the process-wide notification defaults, including
//! loading and saving them to a `notifications.toml` file.
//!
//! # Path Resolution
//!
//! The file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_TOASTS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_toasts::config;
//! use iced_toasts::notifications::{NotificationManager, Position};
//!
//! // Load existing defaults (returns tuple with optional warning)
//! let (mut defaults, _warning) = config::load();
//!
//! // Modify a setting
//! defaults.position = Position::BottomRight;
//!
//! // Save and hand them to a manager
//! config::save(&defaults).expect("Failed to save defaults");
//! let manager = NotificationManager::new().with_defaults(defaults);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::notifications::{
    MaxCount, NotifyOptions, Position, PositionSpec, Priority, Severity, Size,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "notifications.toml";
const APP_NAME: &str = "IcedToasts";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_TOASTS_CONFIG_DIR";

/// Defaults merged under every notification's own options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationDefaults {
    pub kind: Severity,
    /// Auto-dismiss countdown in milliseconds; zero or negative disables it.
    pub duration_ms: i64,
    /// Parsed like [`NotifyOptions::position`]; an unknown name falls back to
    /// the built-in anchor without discarding the rest of the file.
    #[serde(deserialize_with = "lenient_position")]
    pub position: Position,
    pub closable: bool,
    pub size: Size,
    pub show_icon: bool,
    pub bordered: bool,
    pub rounded: bool,
    pub max_count: MaxCount,
    pub pause_on_hover: bool,
    pub show_progress: bool,
    pub persistent: bool,
    pub priority: Priority,
}

fn lenient_position<'de, D>(deserializer: D) -> std::result::Result<Position, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(PositionSpec::Named(name).resolve(Position::default()))
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            kind: Severity::Info,
            duration_ms: DEFAULT_DURATION_MS,
            position: Position::TopRight,
            closable: false,
            size: Size::Medium,
            show_icon: true,
            bordered: true,
            rounded: true,
            max_count: MaxCount::default(),
            pause_on_hover: true,
            show_progress: false,
            persistent: false,
            priority: Priority::Normal,
        }
    }
}

impl NotificationDefaults {
    /// Overwrites every default the options set.
    ///
    /// Per-notification fields (text, description, action, `on_close`) are ignored.
    pub fn apply(&mut self, options: &NotifyOptions) {
        if let Some(kind) = options.kind {
            self.kind = kind;
        }
        if let Some(duration_ms) = options.duration_ms {
            self.duration_ms = duration_ms;
        }
        if let Some(spec) = &options.position {
            self.position = spec.resolve(self.position);
        }
        if let Some(closable) = options.closable {
            self.closable = closable;
        }
        if let Some(size) = options.size {
            self.size = size;
        }
        if let Some(show_icon) = options.show_icon {
            self.show_icon = show_icon;
        }
        if let Some(bordered) = options.bordered {
            self.bordered = bordered;
        }
        if let Some(rounded) = options.rounded {
            self.rounded = rounded;
        }
        if let Some(max_count) = options.max_count {
            self.max_count = max_count;
        }
        if let Some(pause_on_hover) = options.pause_on_hover {
            self.pause_on_hover = pause_on_hover;
        }
        if let Some(show_progress) = options.show_progress {
            self.show_progress = show_progress;
        }
        if let Some(persistent) = options.persistent {
            self.persistent = persistent;
        }
        if let Some(priority) = options.priority {
            self.priority = priority;
        }
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory with an optional override.
fn get_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the defaults from the default path.
///
/// Returns a tuple of (defaults, optional_warning). If loading fails, returns
/// built-in defaults with a warning message explaining what went wrong.
pub fn load() -> (NotificationDefaults, Option<String>) {
    load_with_override(None)
}

/// Loads the defaults from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (NotificationDefaults, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(defaults) => return (defaults, None),
                Err(err) => {
                    let warning = format!("failed to load {}: {err}", path.display());
                    tracing::warn!("{warning}");
                    return (NotificationDefaults::default(), Some(warning));
                }
            }
        }
    }
    (NotificationDefaults::default(), None)
}

/// Loads defaults from a specific path. Missing keys take built-in values.
pub fn load_from_path(path: &Path) -> Result<NotificationDefaults> {
    let content = fs::read_to_string(path)?;
    let defaults: NotificationDefaults = toml::from_str(&content)?;
    Ok(defaults)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the defaults to the default path.
pub fn save(defaults: &NotificationDefaults) -> Result<()> {
    save_with_override(defaults, None)
}

/// Saves the defaults to a custom directory.
pub fn save_with_override(defaults: &NotificationDefaults, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(defaults, &path);
    }
    Ok(())
}

/// Saves defaults to a specific path, creating parent directories.
pub fn save_to_path(defaults: &NotificationDefaults, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(defaults).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
