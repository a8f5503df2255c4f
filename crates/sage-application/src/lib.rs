//! Application layer: the three assistant services.
//!
//! Each service owns its generation parameters and a shared
//! [`CompletionProvider`](sage_interaction::CompletionProvider) handle.
//! Session state (the conversation) is owned by the caller and passed in
//! explicitly; the services hold no ambient state between calls.

pub mod chat_service;
pub mod plan_service;
pub mod prompts;
pub mod qa_service;

pub use chat_service::ChatService;
pub use plan_service::LearningPathService;
pub use qa_service::{DocumentQaService, QaOutcome, QaStepRecord, Verdict};
