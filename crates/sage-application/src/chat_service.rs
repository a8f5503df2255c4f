//! Conversational chat session service.

use sage_core::config::GenerationConfig;
use sage_core::session::Conversation;
use sage_core::{Result, SageError};
use sage_interaction::{ChatMessage, CompletionProvider, CompletionRequest};
use std::sync::Arc;

/// Drives a chat conversation against a completion provider.
///
/// The service itself is stateless: the conversation is owned by the caller
/// and passed in by mutable reference on every call.
pub struct ChatService {
    provider: Arc<dyn CompletionProvider>,
    generation: GenerationConfig,
}

impl ChatService {
    /// Creates a chat service with the given provider and sampling parameters.
    pub fn new(provider: Arc<dyn CompletionProvider>, generation: GenerationConfig) -> Self {
        Self {
            provider,
            generation,
        }
    }

    /// Submits a user message and returns the assistant's reply.
    ///
    /// The full ordered history plus the new message is sent to the provider.
    /// Both the user turn and the assistant turn are committed to the
    /// conversation only after the call succeeds; on any failure the
    /// conversation is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - `SageError::Validation` for empty input (no remote call attempted)
    /// - `SageError::Provider` for transport or API failures
    pub async fn send_message(
        &self,
        conversation: &mut Conversation,
        input: &str,
    ) -> Result<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SageError::validation("message must not be empty"));
        }

        let mut messages: Vec<ChatMessage> =
            conversation.messages().iter().map(ChatMessage::from).collect();
        messages.push(ChatMessage::user(trimmed));

        tracing::debug!(
            conversation = %conversation.id,
            turns = messages.len(),
            provider = self.provider.describe(),
            "submitting chat turn"
        );

        let request = CompletionRequest::from_generation(messages, &self.generation);
        let reply = self.provider.complete(request).await?;

        // Commit both turns only now that the exchange succeeded.
        conversation.push_user(trimmed);
        conversation.push_assistant(&reply);

        Ok(reply)
    }
}
