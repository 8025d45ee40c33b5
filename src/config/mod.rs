//! Configuration module for ScopeVis-RS
//!
//! This module handles engine configuration:
//! - Default axis, curve and render settings for new diagrams
//! - Update worker cadence
//! - Persistence as TOML in the app data directory
//!
//! # App Data Location
//!
//! The default config file lives in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.scopevis/`
//! - **macOS**: `~/Library/Application Support/dev.scopevis/`
//! - **Windows**: `%APPDATA%\dev.scopevis\`
//!
//! # Example
//!
//! ```ignore
//! use scopevis_rs::config::ScopeConfig;
//!
//! let mut config = ScopeConfig::load_or_default();
//! config.update.interval_ms = 100;
//! config.save(ScopeConfig::default_path().unwrap())?;
//! ```

pub mod settings;

pub use settings::*;

use crate::axis::limits::DEFAULT_HISTORY_DEPTH;
use crate::error::{Result, ScopeError};
use crate::series::TimeSeriesKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.scopevis";

/// Config filename inside the app data directory
pub const CONFIG_FILE: &str = "scope_config.toml";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

// ==================== Scope Config ====================

/// Everything a scope reads at construction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub update: UpdateSettings,

    /// Zoom undo entries kept per axis
    pub history_depth: usize,

    /// Time series strategy for containers created by the engine
    pub series: TimeSeriesKind,

    pub render: RenderSettings,
    pub axis_ticks: AxisTickSettings,
    pub axis_grid: AxisGridSettings,

    /// Defaults for new curves; the color is taken from the palette
    pub curve: CurveSettings,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            update: UpdateSettings::default(),
            history_depth: DEFAULT_HISTORY_DEPTH,
            series: TimeSeriesKind::default(),
            render: RenderSettings::default(),
            axis_ticks: AxisTickSettings::default(),
            axis_grid: AxisGridSettings::default(),
            curve: CurveSettings::default(),
        }
    }
}

impl ScopeConfig {
    /// Path of the config file in the app data directory
    pub fn default_path() -> Option<PathBuf> {
        app_data_dir().map(|p| p.join(CONFIG_FILE))
    }

    /// Load a config from a TOML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScopeError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ScopeError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::warn!("Could not determine app data directory, using default config");
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save as TOML, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScopeError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScopeError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ScopeError::Config(format!("Failed to write config: {}", e)))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
