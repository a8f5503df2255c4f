//! GroqApiProvider - Direct REST API implementation for Groq.
//!
//! This provider calls the Groq OpenAI-compatible Chat Completions API.
//! Configuration priority: ~/.config/sage/secret.json > environment variables

use crate::provider::{ChatMessage, CompletionProvider, CompletionRequest, ProviderError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use sage_infrastructure::storage::SecretStorage;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const BASE_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Provider implementation that talks to the Groq HTTP API.
#[derive(Clone)]
pub struct GroqApiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    description: String,
}

impl GroqApiProvider {
    /// Creates a new provider with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            description: format!("Groq chat-completions provider ({model})"),
            model,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Loads configuration from ~/.config/sage/secret.json or environment
    /// variables.
    ///
    /// Priority:
    /// 1. ~/.config/sage/secret.json
    /// 2. Environment variables (GROQ_API_KEY, GROQ_MODEL_NAME)
    ///
    /// Model name defaults to `llama-3.3-70b-versatile` if not specified.
    pub fn try_from_env() -> Result<Self, ProviderError> {
        // Try loading from SecretStorage first
        if let Ok(storage) = SecretStorage::new() {
            if let Ok(secret_config) = storage.load() {
                if let Some(groq_config) = secret_config.groq {
                    let model = groq_config
                        .model_name
                        .unwrap_or_else(|| DEFAULT_GROQ_MODEL.into());
                    return Ok(Self::new(groq_config.api_key, model));
                }
            }
        }

        // Fallback to environment variables
        let api_key = env::var("GROQ_API_KEY").map_err(|_| {
            ProviderError::MissingCredentials(
                "GROQ_API_KEY not found in ~/.config/sage/secret.json or environment variables"
                    .into(),
            )
        })?;

        let model = env::var("GROQ_MODEL_NAME").unwrap_or_else(|_| DEFAULT_GROQ_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self.description = format!("Groq chat-completions provider ({})", self.model);
        self
    }

    /// Overrides the endpoint, for other OpenAI-compatible services.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_body(&self, request: &CompletionRequest) -> Result<ChatCompletionRequest, ProviderError> {
        if request.messages.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "completion request must include at least one message".into(),
            ));
        }

        Ok(ChatCompletionRequest {
            model: request
                .model_override
                .clone()
                .unwrap_or_else(|| self.model.clone()),
            messages: request.messages.clone(),
            temperature: Some(request.temperature),
            max_tokens: Some(request.max_tokens),
        })
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| ProviderError::Transport {
                message: format!("Groq API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Groq error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Parse(format!("Groq response was not valid JSON: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionProvider for GroqApiProvider {
    fn describe(&self) -> &str {
        &self.description
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let body = self.build_body(&request)?;

        tracing::debug!(
            model = %body.model,
            messages = body.messages.len(),
            "sending chat completion request"
        );

        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[allow(dead_code)]
    r#type: Option<String>,
    #[allow(dead_code)]
    code: Option<String>,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, ProviderError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ProviderError::EmptyCompletion)?;

    if content.trim().is_empty() {
        return Err(ProviderError::EmptyCompletion);
    }

    Ok(content)
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> ProviderError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    ProviderError::Api {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Retry-After HTTP-date parsing is omitted for simplicity
    None
}
