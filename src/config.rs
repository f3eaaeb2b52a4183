// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::model::Markers;
use crate::paths::AppPaths;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Report phrases to scan for. Overridable for teams that use a
    /// different standup template.
    #[serde(default)]
    pub markers: Markers,
    /// Pre-fills the name input when no preference is stored.
    #[serde(default)]
    pub default_name: String,
    /// Directory CSV exports are written into. None means the current
    /// working directory.
    #[serde(default)]
    pub export_dir: Option<String>,
}

impl Config {
    /// Load the configuration from disk.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load() -> Result<Self> {
        let path = AppPaths::get_config_file_path()?;

        // Explicitly detect missing file so callers can fall back to defaults.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        // Read the file with contextualized error (covers permission/IO issues).
        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        // Parse TOML with contextualized error (covers syntax issues).
        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Load the configuration, treating a missing file as defaults.
    /// A present-but-malformed file is still an error.
    pub fn load_or_default() -> Result<Self> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    /// This tries multiple strategies:
    ///  - Fast path: check for our explicit "Config file not found" message
    ///  - Look for underlying IO NotFound errors in the error chain
    pub fn is_missing_config_error(err: &Error) -> bool {
        // Fast textual check for the explicit not-found message.
        if err.to_string().contains("Config file not found") {
            return true;
        }

        // Walk the error chain and look for an underlying IO NotFound.
        // This makes detection robust even when errors are wrapped.
        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration to disk.
    pub fn save(&self) -> Result<()> {
        let path = AppPaths::get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Get the config file path as a display string.
    pub fn get_path_string() -> Result<String> {
        let path = AppPaths::get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}
