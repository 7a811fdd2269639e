//! Editor configuration.

use crate::button::SerializableColor;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension used for layout files when none is configured.
pub const DEFAULT_LAYOUT_EXTENSION: &str = "pickpad";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Tunables for an editor session. Every field has a default, so a config
/// file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Pointer travel (px) below which a press/release pair is a click.
    pub click_threshold: f64,
    /// Visible canvas size when there is no background image.
    pub canvas_size: Size,
    /// Scale applied to the background image size.
    pub background_scale: f64,
    /// Size of a button created for a single entity.
    pub single_size: Size,
    /// Size of the group button created for several entities.
    pub group_size: Size,
    /// Vertical spacing of the per-entity buttons under a group button.
    pub row_spacing: f64,
    /// Color used when no color policy gives one.
    pub default_color: SerializableColor,
    /// Required extension for layout files (without the dot).
    pub layout_extension: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            click_threshold: 2.0,
            canvas_size: Size::new(400.0, 400.0),
            background_scale: 1.0,
            single_size: Size::new(10.0, 10.0),
            group_size: Size::new(20.0, 10.0),
            row_spacing: 20.0,
            default_color: SerializableColor::neutral(),
            layout_extension: DEFAULT_LAYOUT_EXTENSION.to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Load the config from the default location, falling back to defaults
    /// when no file exists there.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Default config location.
    ///
    /// On Unix: `~/.config/pickpad/config.json`
    /// On Windows: `%APPDATA%\pickpad\config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .map(|base| base.join("pickpad").join("config.json"))
    }
}
