//! Well-known filesystem locations for SAGE configuration.

use crate::storage::StorageError;
use std::path::PathBuf;

/// Resolver for SAGE's configuration paths.
pub struct SagePaths;

impl SagePaths {
    /// Returns the configuration directory: `~/.config/sage`
    pub fn config_dir() -> Result<PathBuf, StorageError> {
        let home = dirs::home_dir().ok_or(StorageError::HomeDirNotFound)?;
        Ok(home.join(".config").join("sage"))
    }

    /// Returns the path to the secret file: `~/.config/sage/secret.json`
    pub fn secret_file() -> Result<PathBuf, StorageError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to the configuration file: `~/.config/sage/config.toml`
    pub fn config_file() -> Result<PathBuf, StorageError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
