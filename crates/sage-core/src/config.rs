//! Configuration types for generation parameters and provider secrets.
//!
//! `AppConfig` mirrors the optional `~/.config/sage/config.toml` file and
//! carries one `GenerationConfig` per assistant. `SecretConfig` mirrors
//! `~/.config/sage/secret.json`.

use serde::{Deserialize, Serialize};

/// Sampling parameters for a single assistant.
///
/// Each assistant ships with fixed defaults; users can override them in
/// `config.toml`. `model_name` overrides the provider default when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub model_name: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationConfig {
    /// Defaults for the conversational chat session.
    pub fn chat() -> Self {
        Self {
            model_name: None,
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    /// Defaults for weekly-focus generation in the learning-path service.
    pub fn learning_path() -> Self {
        Self {
            model_name: None,
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    /// Defaults for the document-QA pipeline. Low temperature keeps the
    /// grading steps close to a binary verdict.
    pub fn document_qa() -> Self {
        Self {
            model_name: None,
            temperature: 0.1,
            max_tokens: 1000,
        }
    }
}

/// Root configuration structure for config.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "GenerationConfig::chat")]
    pub chat: GenerationConfig,
    #[serde(default = "GenerationConfig::learning_path")]
    pub learning_path: GenerationConfig,
    #[serde(default = "GenerationConfig::document_qa")]
    pub document_qa: GenerationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chat: GenerationConfig::chat(),
            learning_path: GenerationConfig::learning_path(),
            document_qa: GenerationConfig::document_qa(),
        }
    }
}

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub groq: Option<GroqSecret>,
}

/// Groq API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GroqSecret {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}
