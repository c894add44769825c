//! Configuration module for FrameSaver-RS
//!
//! This module handles:
//! - The configuration file (node class names, reserved ids, step priority)
//! - Typed user parameters registered by extensions ([`params`])
//!
//! # Config Location
//!
//! The configuration file lives in the platform-appropriate config directory
//! under `framesaver-rs`:
//!
//! - **Linux**: `~/.config/framesaver-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/framesaver-rs/config.toml`
//! - **Windows**: `%APPDATA%\framesaver-rs\config.toml`
//!
//! Every section and field is optional; missing values use the defaults.
//!
//! ```toml
//! [nodes]
//! decode = "VAEDecode"
//! save_image = "SwarmSaveImageWS"
//!
//! [ids]
//! reserved_base = 50000
//!
//! [step]
//! priority = 20
//! ```

pub mod params;
pub mod settings;

pub use params::{ParamError, ParamHandle, ParamRegistry, ParamSpec, ParamType, UserInput};
pub use settings::*;

use crate::error::{FrameSaverError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "framesaver-rs";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Start of the identifier range reserved for save sinks
pub const DEFAULT_RESERVED_ID_BASE: u32 = 50000;

/// Default build step priority: after generation steps, before finalization
pub const DEFAULT_STEP_PRIORITY: i32 = 20;

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default config file
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSaverConfig {
    pub nodes: NodeClassSettings,
    pub ids: IdSettings,
    pub step: StepSettings,
}

impl FrameSaverConfig {
    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FrameSaverError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            FrameSaverError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Load a config file, returning defaults if it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Load the config from the default location
    pub fn load_from_default_location() -> Self {
        match default_config_path() {
            Some(path) => Self::load_or_default(path),
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                Self::default()
            }
        }
    }

    /// Save the config to disk as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FrameSaverError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| FrameSaverError::Serialization(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            FrameSaverError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }
}
