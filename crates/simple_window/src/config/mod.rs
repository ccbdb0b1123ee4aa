//! Configuration system
//!
//! [`WindowConfig`] carries every parameter a window is created with. Configs
//! load from TOML or RON through the [`Config`] trait, picked by file extension.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Smallest width a window is created or resized to
pub const MIN_WIDTH: u32 = 150;
/// Smallest height a window is created or resized to
pub const MIN_HEIGHT: u32 = 50;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match Format::of(path)? {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML or RON text did not match the configuration schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration could not be written as TOML or RON
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// File extension is neither `.toml` nor `.ron`
    #[error("Unsupported config format (expected .toml or .ron): {0}")]
    UnsupportedFormat(String),
}

/// Parameters a window is created with
///
/// Unset dimensions fall back to [`MIN_WIDTH`] x [`MIN_HEIGHT`], unset
/// coordinates to the screen origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Client width in pixels
    pub width: Option<u32>,
    /// Client height in pixels
    pub height: Option<u32>,
    /// Screen x of the client area
    pub x: Option<i32>,
    /// Screen y of the client area
    pub y: Option<i32>,
    /// Title-bar color
    pub title_bar_color: Rgb,
    /// Whether the user can resize the window
    pub resizable: bool,
    /// Whether the window floats above normal windows
    pub top_most: bool,
    /// Raise the window when it is created
    pub foreground: bool,
    /// Minimize the window when it is created
    pub minimized: bool,
    /// Recreate the window when the user closes it
    pub undestroyable: bool,
    /// Path to a `.ico` file, empty for the default icon
    pub icon: PathBuf,
    /// Silence warnings about suppressed failures
    pub no_warnings: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            x: None,
            y: None,
            title_bar_color: Rgb::BLACK,
            resizable: true,
            top_most: false,
            foreground: true,
            minimized: false,
            undestroyable: false,
            icon: PathBuf::new(),
            no_warnings: false,
        }
    }
}

impl WindowConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client size
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the client position
    pub const fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the title-bar color
    pub fn with_title_bar_color(mut self, color: impl Into<Rgb>) -> Self {
        self.title_bar_color = color.into();
        self
    }

    /// Set resizability
    pub const fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Keep the window above others
    pub const fn with_top_most(mut self, top_most: bool) -> Self {
        self.top_most = top_most;
        self
    }

    /// Raise on creation
    pub const fn with_foreground(mut self, foreground: bool) -> Self {
        self.foreground = foreground;
        self
    }

    /// Minimize on creation
    pub const fn with_minimized(mut self, minimized: bool) -> Self {
        self.minimized = minimized;
        self
    }

    /// Recreate after the user closes it
    pub const fn with_undestroyable(mut self, undestroyable: bool) -> Self {
        self.undestroyable = undestroyable;
        self
    }

    /// Set the icon path
    pub fn with_icon(mut self, icon: impl Into<PathBuf>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Silence warnings
    pub const fn with_no_warnings(mut self, no_warnings: bool) -> Self {
        self.no_warnings = no_warnings;
        self
    }

    /// Size with defaults applied and clamped to the minimum
    pub fn resolved_size(&self) -> (u32, u32) {
        (
            self.width.unwrap_or(MIN_WIDTH).max(MIN_WIDTH),
            self.height.unwrap_or(MIN_HEIGHT).max(MIN_HEIGHT),
        )
    }

    /// Position with defaults applied
    pub fn resolved_position(&self) -> (i32, i32) {
        (self.x.unwrap_or(0), self.y.unwrap_or(0))
    }
}

impl Config for WindowConfig {}

/// A set of named windows, as stored in a layout file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Window configurations keyed by window name
    pub windows: BTreeMap<String, WindowConfig>,
}

impl Config for LayoutConfig {}
