//! Application configuration management
//!
//! Handles loading and saving presentation settings:
//! - layout breakpoint and explorer width
//! - event loop tick rate
//! - which document opens at startup and where the catalog comes from

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Narrowest terminal width, in columns, that still gets the wide layout
pub const DEFAULT_COMPACT_BREAKPOINT: u16 = 100;

/// Lower bounds for the numeric settings
pub const MIN_COMPACT_BREAKPOINT: u16 = 1;
pub const MIN_EXPLORER_WIDTH: u16 = 12;
pub const MIN_TICK_RATE_MS: u64 = 16;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Terminals narrower than this use the compact layout
    #[serde(default = "default_compact_breakpoint")]
    pub compact_breakpoint: u16,

    /// Width of the explorer panel in the wide layout
    #[serde(default = "default_explorer_width")]
    pub explorer_width: u16,

    /// Event loop tick interval in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Document opened when the app starts
    #[serde(default = "default_startup_document")]
    pub startup_document: String,

    /// Catalog file to show instead of the built-in portfolio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_path: Option<PathBuf>,
}

fn default_compact_breakpoint() -> u16 {
    DEFAULT_COMPACT_BREAKPOINT
}

fn default_explorer_width() -> u16 {
    32
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_startup_document() -> String {
    "README.md".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compact_breakpoint: default_compact_breakpoint(),
            explorer_width: default_explorer_width(),
            tick_rate_ms: default_tick_rate_ms(),
            startup_document: default_startup_document(),
            content_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config.clamped())
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "devfolio", "devfolio")
            .ok_or_else(|| FolioError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Whether a terminal `width` columns wide gets the compact layout
    pub fn is_compact(&self, width: u16) -> bool {
        width < self.compact_breakpoint
    }

    /// Raise hand-edited values below their minimums
    pub fn clamped(mut self) -> Self {
        self.compact_breakpoint = self.compact_breakpoint.max(MIN_COMPACT_BREAKPOINT);
        self.explorer_width = self.explorer_width.max(MIN_EXPLORER_WIDTH);
        self.tick_rate_ms = self.tick_rate_ms.max(MIN_TICK_RATE_MS);
        self
    }
}
