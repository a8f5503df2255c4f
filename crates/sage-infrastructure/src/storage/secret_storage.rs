//! Secret configuration file storage.
//!
//! Provides loading of API credentials from ~/.config/sage/secret.json.

use super::StorageError;
use crate::paths::SagePaths;
use sage_core::config::SecretConfig;
use std::fs;
use std::path::PathBuf;

/// Storage for the secret configuration file (secret.json).
///
/// Responsibilities:
/// - Load secret.json from ~/.config/sage/
/// - Parse JSON into the SecretConfig domain model
/// - Provide error handling for missing or invalid files
///
/// Does NOT:
/// - Write or modify secret files (read-only)
/// - Validate API keys or credentials
/// - Handle encryption (plaintext JSON storage)
///
/// # Security Note
///
/// This storage reads plaintext JSON files. The secret.json file should have
/// appropriate file permissions (e.g., 600) to prevent unauthorized access,
/// and its contents must never appear in error messages or logs.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a new SecretStorage with the default path
    /// (~/.config/sage/secret.json).
    pub fn new() -> Result<Self, StorageError> {
        let path = SagePaths::secret_file()?;
        Ok(Self { path })
    }

    /// Creates a new SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration from the JSON file.
    ///
    /// # Errors
    ///
    /// - `StorageError::NotFound`: File doesn't exist
    /// - `StorageError::Io`: Failed to read the file
    /// - `StorageError::Json`: Invalid JSON format
    pub fn load(&self) -> Result<SecretConfig, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Returns `true` if the secret file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Returns the path to the secret file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let storage = SecretStorage::with_path(file_path.clone());

        assert!(!storage.exists());
        let result = storage.load();
        match result {
            Err(StorageError::NotFound(path)) => assert_eq!(path, file_path),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        let json_content = r#"{
            "groq": {
                "api_key": "gsk-test-123",
                "model_name": "llama-3.3-70b-versatile"
            }
        }"#;

        fs::write(&file_path, json_content).unwrap();

        let storage = SecretStorage::with_path(file_path);
        let config = storage.load().unwrap();

        let groq = config.groq.unwrap();
        assert_eq!(groq.api_key, "gsk-test-123");
        assert_eq!(groq.model_name, Some("llama-3.3-70b-versatile".to_string()));
    }

    #[test]
    fn test_load_empty_config() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        fs::write(&file_path, "{}").unwrap();

        let storage = SecretStorage::with_path(file_path);
        let config = storage.load().unwrap();

        assert!(config.groq.is_none());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        fs::write(&file_path, "{ invalid json").unwrap();

        let storage = SecretStorage::with_path(file_path);
        let result = storage.load();

        assert!(matches!(result, Err(StorageError::Json(_))));
    }
}
