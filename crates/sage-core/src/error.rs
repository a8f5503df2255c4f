//! Error types for the SAGE application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire SAGE application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SageError {
    /// User input rejected before any remote call was attempted
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Configuration error (missing API key, unreadable config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion provider error (network, quota, malformed response)
    #[error("Provider error: {message}")]
    Provider {
        message: String,
        status_code: Option<u16>,
        is_retryable: bool,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", "template", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SageError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Provider error without HTTP metadata
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            status_code: None,
            is_retryable: false,
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a Provider error
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }

    /// Check if this error represents a retryable provider failure.
    ///
    /// No retry is ever performed automatically; this is surfaced so the user
    /// can decide to resubmit.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Provider {
                is_retryable: true,
                ..
            }
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SageError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SageError>`.
pub type Result<T> = std::result::Result<T, SageError>;
