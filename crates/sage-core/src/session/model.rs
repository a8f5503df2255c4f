//! Conversation domain model.
//!
//! This module contains the `Conversation` entity: an owned, append-only
//! sequence of turns that callers pass explicitly to each handler. There is
//! no process-wide conversation state.

use super::message::{ConversationMessage, MessageRole};
use serde::{Deserialize, Serialize};

/// An in-memory conversation session.
///
/// A conversation contains:
/// - An ordered, append-only turn history (chronological order is significant
///   because the full sequence is replayed as context on every completion)
/// - Timestamps for creation and last update
///
/// The history lives only for the duration of the interactive session; it is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier (UUID format)
    pub id: String,
    /// Human-readable conversation title
    pub title: String,
    /// Timestamp when the conversation was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the conversation was last updated (ISO 8601 format)
    pub updated_at: String,
    /// Ordered turn history. Not public: turns are only ever appended.
    messages: Vec<ConversationMessage>,
}

impl Conversation {
    /// Creates a new, empty conversation.
    pub fn new() -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        let title = format!("Conversation {}", &id[..8]);

        Self {
            id,
            title,
            created_at: now.clone(),
            updated_at: now,
            messages: Vec::new(),
        }
    }

    /// Appends a user turn to the history.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(MessageRole::User, content);
    }

    /// Appends an assistant turn to the history.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(MessageRole::Assistant, content);
    }

    fn push(&mut self, role: MessageRole, content: impl Into<String>) {
        let message = ConversationMessage::now(role, content);
        self.updated_at = message.timestamp.clone();
        self.messages.push(message);
    }

    /// Returns the full ordered turn history for rendering or replay.
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Returns the most recent turn, if any.
    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    /// Returns the number of turns in the history.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the conversation has no turns yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_is_empty() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
        assert_eq!(conversation.len(), 0);
        assert!(conversation.title.starts_with("Conversation "));
    }

    #[test]
    fn test_turns_preserve_chronological_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("What is ownership?");
        conversation.push_assistant("Ownership is Rust's memory model.");
        conversation.push_user("And borrowing?");

        let roles: Vec<MessageRole> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(conversation.last().unwrap().content, "And borrowing?");
    }

    #[test]
    fn test_unique_ids() {
        let a = Conversation::new();
        let b = Conversation::new();
        assert_ne!(a.id, b.id);
    }
}
