//! Completion-provider layer.
//!
//! This crate defines the seam between the assistants and the hosted
//! text-generation API: the [`CompletionProvider`] trait, its request and
//! error types, and the Groq HTTP implementation. Services depend only on
//! the trait, so tests inject stub providers and never touch the network.

mod groq_api_provider;
mod provider;
pub mod supported_models;

pub use groq_api_provider::GroqApiProvider;
pub use provider::{ChatMessage, CompletionProvider, CompletionRequest, ProviderError};
