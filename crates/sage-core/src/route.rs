//! Question routing for the document-QA assistant.
//!
//! The router is a two-branch decision table: a question that mentions the
//! configured needle is answered from the document store, everything else
//! goes to web search. It holds no other state.

use crate::error::{Result, SageError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The retrieval source selected for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrievalRoute {
    /// Answer from the indexed document.
    Document,
    /// Answer from web search.
    WebSearch,
}

impl RetrievalRoute {
    /// The label used in prompts and display output.
    pub fn label(&self) -> &'static str {
        match self {
            RetrievalRoute::Document => "vectorstore",
            RetrievalRoute::WebSearch => "web_search",
        }
    }
}

impl fmt::Display for RetrievalRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Routes questions by substring match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRouter {
    needle: String,
}

impl QuestionRouter {
    /// The document needle used by default.
    pub const DEFAULT_NEEDLE: &'static str = "self-attention";

    /// Creates a router matching the given needle.
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    /// Selects the retrieval source for a question.
    ///
    /// # Errors
    ///
    /// Returns `SageError::Validation` for an empty question; absent input is
    /// the router's only failure mode.
    pub fn route(&self, question: &str) -> Result<RetrievalRoute> {
        if question.trim().is_empty() {
            return Err(SageError::validation("question must not be empty"));
        }

        if question.contains(&self.needle) {
            Ok(RetrievalRoute::Document)
        } else {
            Ok(RetrievalRoute::WebSearch)
        }
    }
}

impl Default for QuestionRouter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NEEDLE)
    }
}
