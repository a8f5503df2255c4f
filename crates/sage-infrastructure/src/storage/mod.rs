//! Read-only storage for user configuration files.
//!
//! # Module Structure
//!
//! - `secret_storage`: Loads `secret.json` (API credentials)
//! - `config_storage`: Loads `config.toml` (generation parameters)

mod config_storage;
mod secret_storage;

pub use config_storage::ConfigStorage;
pub use secret_storage::SecretStorage;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Configuration file not found.
    #[error("Configuration file not found at: {}", .0.display())]
    NotFound(PathBuf),
    /// Could not determine the home directory.
    #[error("Could not determine home directory")]
    HomeDirNotFound,
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
