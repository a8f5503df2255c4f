//! Application configuration file storage.
//!
//! Loads generation parameters from ~/.config/sage/config.toml. A missing
//! file is not an error: every assistant has built-in defaults.

use super::StorageError;
use crate::paths::SagePaths;
use sage_core::config::AppConfig;
use std::fs;
use std::path::PathBuf;

/// Storage for the application configuration file (config.toml).
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a new ConfigStorage with the default path
    /// (~/.config/sage/config.toml).
    pub fn new() -> Result<Self, StorageError> {
        let path = SagePaths::config_file()?;
        Ok(Self { path })
    }

    /// Creates a new ConfigStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration, falling back to defaults when the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// - `StorageError::Io`: The file exists but could not be read
    /// - `StorageError::Toml`: The file exists but is not valid TOML
    pub fn load_or_default(&self) -> Result<AppConfig, StorageError> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Returns the path to the configuration file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
