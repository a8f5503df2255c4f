//! The completion-provider abstraction.
//!
//! A provider executes a single request/response exchange with a hosted
//! text-generation model. Implementations live in this crate; everything
//! above it programs against the trait.

use async_trait::async_trait;
use sage_core::SageError;
use sage_core::config::GenerationConfig;
use sage_core::session::ConversationMessage;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors returned by completion providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No usable credentials were found at startup.
    #[error("{0}")]
    MissingCredentials(String),

    /// The request never produced an HTTP response (connect/timeout).
    #[error("{message}")]
    Transport { message: String, is_retryable: bool },

    /// The API answered with a non-success status.
    #[error("API error: {message}")]
    Api {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The request was malformed before it was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The response body could not be parsed.
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// The API answered successfully but returned no completion text.
    #[error("Provider returned an empty completion")]
    EmptyCompletion,
}

impl ProviderError {
    /// Whether resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Transport { is_retryable, .. } => *is_retryable,
            ProviderError::Api { is_retryable, .. } => *is_retryable,
            _ => false,
        }
    }
}

impl From<ProviderError> for SageError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingCredentials(message) => SageError::config(message),
            ProviderError::Transport {
                message,
                is_retryable,
            } => SageError::Provider {
                message,
                status_code: None,
                is_retryable,
            },
            ProviderError::Api {
                status_code,
                message,
                is_retryable,
                ..
            } => SageError::Provider {
                message,
                status_code,
                is_retryable,
            },
            other => SageError::Provider {
                message: other.to_string(),
                status_code: None,
                is_retryable: false,
            },
        }
    }
}

/// A single role/content pair as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

impl From<&ConversationMessage> for ChatMessage {
    fn from(message: &ConversationMessage) -> Self {
        Self {
            role: message.role.as_wire_str().to_string(),
            content: message.content.clone(),
        }
    }
}

/// One completion call: an ordered message list plus sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Ordered role/content pairs; the last entry is the newest input.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Overrides the provider's configured model when set.
    pub model_override: Option<String>,
}

impl CompletionRequest {
    /// Builds a request from a message list and an assistant's generation
    /// configuration.
    pub fn from_generation(messages: Vec<ChatMessage>, generation: &GenerationConfig) -> Self {
        Self {
            messages,
            temperature: generation.temperature,
            max_tokens: generation.max_tokens,
            model_override: generation.model_name.clone(),
        }
    }
}

/// A hosted text-generation backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short human-readable description of the backing model/endpoint.
    fn describe(&self) -> &str;

    /// Executes one completion call and returns the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}
