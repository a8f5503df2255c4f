//! Session domain module.
//!
//! This module contains the conversation domain models for the chat session.
//!
//! # Module Structure
//!
//! - `model`: Core conversation domain model (`Conversation`)
//! - `message`: Conversation message types (`MessageRole`, `ConversationMessage`)

mod message;
mod model;

// Re-export public API
pub use message::{ConversationMessage, MessageRole};
pub use model::Conversation;
