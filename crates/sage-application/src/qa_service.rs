//! Document question-answering service.
//!
//! The service routes a question to its retrieval source and then runs an
//! explicit ordered pipeline of named steps. Each step is a pure function
//! from the accumulated [`QaContext`] to a prompt string; the service is the
//! only place that talks to the provider, so the whole pipeline is testable
//! with a stub provider and no network.

use crate::prompts;
use sage_core::config::GenerationConfig;
use sage_core::route::{QuestionRouter, RetrievalRoute};
use sage_core::{Result, SageError};
use sage_interaction::{ChatMessage, CompletionProvider, CompletionRequest};
use std::sync::Arc;

/// A lenient binary verdict parsed from a grading step's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Yes,
    No,
}

impl Verdict {
    /// Parses a model answer into a verdict. Anything that does not contain
    /// "yes" counts as `No`.
    fn parse(text: &str) -> Self {
        if text.to_lowercase().contains("yes") {
            Verdict::Yes
        } else {
            Verdict::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Yes => "yes",
            Verdict::No => "no",
        }
    }
}

/// Accumulated state threaded through the pipeline steps.
#[derive(Debug, Clone)]
struct QaContext {
    question: String,
    route: RetrievalRoute,
    retrieved: Option<String>,
    relevance: Option<Verdict>,
    grounding: Option<Verdict>,
    answer: Option<String>,
}

impl QaContext {
    fn new(question: &str, route: RetrievalRoute) -> Self {
        Self {
            question: question.to_string(),
            route,
            retrieved: None,
            relevance: None,
            grounding: None,
            answer: None,
        }
    }

    fn retrieved(&self) -> Result<&str> {
        self.retrieved
            .as_deref()
            .ok_or_else(|| SageError::internal("pipeline step ran before retrieval"))
    }
}

/// One named pipeline step: a pure prompt renderer plus a context update.
struct QaStep {
    name: &'static str,
    render: fn(&QaContext) -> Result<String>,
    apply: fn(&mut QaContext, String),
}

/// The fixed pipeline, in execution order.
const PIPELINE: [QaStep; 4] = [
    QaStep {
        name: "retrieve",
        render: render_retrieve,
        apply: apply_retrieve,
    },
    QaStep {
        name: "grade_relevance",
        render: render_relevance,
        apply: apply_relevance,
    },
    QaStep {
        name: "grade_grounding",
        render: render_grounding,
        apply: apply_grounding,
    },
    QaStep {
        name: "answer",
        render: render_answer,
        apply: apply_answer,
    },
];

fn render_retrieve(ctx: &QaContext) -> Result<String> {
    prompts::qa_retrieve(&ctx.question, ctx.route)
}

fn apply_retrieve(ctx: &mut QaContext, output: String) {
    ctx.retrieved = Some(output);
}

fn render_relevance(ctx: &QaContext) -> Result<String> {
    prompts::qa_grade_relevance(&ctx.question, ctx.retrieved()?)
}

fn apply_relevance(ctx: &mut QaContext, output: String) {
    ctx.relevance = Some(Verdict::parse(&output));
}

fn render_grounding(ctx: &QaContext) -> Result<String> {
    prompts::qa_grade_grounding(&ctx.question, ctx.retrieved()?)
}

fn apply_grounding(ctx: &mut QaContext, output: String) {
    ctx.grounding = Some(Verdict::parse(&output));
}

fn render_answer(ctx: &QaContext) -> Result<String> {
    let relevance = ctx.relevance.unwrap_or(Verdict::No);
    let grounding = ctx.grounding.unwrap_or(Verdict::No);
    prompts::qa_answer(
        &ctx.question,
        ctx.retrieved()?,
        relevance.as_str(),
        grounding.as_str(),
    )
}

fn apply_answer(ctx: &mut QaContext, output: String) {
    ctx.answer = Some(output);
}

/// The raw output of one executed step, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaStepRecord {
    pub step: &'static str,
    pub output: String,
}

/// The result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct QaOutcome {
    /// The retrieval source the router selected.
    pub route: RetrievalRoute,
    /// The final answer text.
    pub answer: String,
    /// Every step's raw output, in execution order.
    pub transcript: Vec<QaStepRecord>,
}

/// Runs questions through the routing and grading pipeline.
pub struct DocumentQaService {
    provider: Arc<dyn CompletionProvider>,
    generation: GenerationConfig,
    router: QuestionRouter,
}

impl DocumentQaService {
    /// Creates a QA service with the default question router.
    pub fn new(provider: Arc<dyn CompletionProvider>, generation: GenerationConfig) -> Self {
        Self {
            provider,
            generation,
            router: QuestionRouter::default(),
        }
    }

    /// Replaces the router (e.g. for a different document needle).
    pub fn with_router(mut self, router: QuestionRouter) -> Self {
        self.router = router;
        self
    }

    /// Answers a question by running the full pipeline.
    ///
    /// A provider failure at any step aborts the run; no partial answer is
    /// surfaced.
    ///
    /// # Errors
    ///
    /// - `SageError::Validation` for an empty question (no call attempted)
    /// - `SageError::Provider` if any step's completion call fails
    pub async fn answer(&self, question: &str) -> Result<QaOutcome> {
        let route = self.router.route(question)?;
        let mut ctx = QaContext::new(question.trim(), route);
        let mut transcript = Vec::with_capacity(PIPELINE.len());

        tracing::info!(%route, "running document-QA pipeline");

        for step in &PIPELINE {
            let prompt = (step.render)(&ctx)?;
            let request = CompletionRequest::from_generation(
                vec![ChatMessage::user(prompt)],
                &self.generation,
            );
            let output = self.provider.complete(request).await?;
            let output = output.trim().to_string();

            tracing::debug!(step = step.name, chars = output.len(), "pipeline step finished");

            (step.apply)(&mut ctx, output.clone());
            transcript.push(QaStepRecord {
                step: step.name,
                output,
            });
        }

        let answer = ctx
            .answer
            .ok_or_else(|| SageError::internal("pipeline finished without an answer"))?;

        Ok(QaOutcome {
            route,
            answer,
            transcript,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use sage_interaction::ProviderError;

    /// Pops one scripted reply per call; an exhausted script fails the call.
    struct ScriptedProvider {
        calls: Mutex<Vec<CompletionRequest>>,
        replies: Mutex<VecDeque<String>>,
    }

    impl ScriptedProvider {
        fn with_replies(replies: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn prompt_of_call(&self, index: usize) -> String {
            self.calls.lock().unwrap()[index].messages[0].content.clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        fn describe(&self) -> &str {
            "scripted stub provider"
        }

        async fn complete(&self, request: CompletionRequest) -> std::result::Result<String, ProviderError> {
            self.calls.lock().unwrap().push(request);
            self.replies.lock().unwrap().pop_front().ok_or_else(|| {
                ProviderError::Api {
                    status_code: Some(503),
                    message: "script exhausted".to_string(),
                    is_retryable: true,
                    retry_after: None,
                }
            })
        }
    }

    fn service(provider: Arc<ScriptedProvider>) -> DocumentQaService {
        DocumentQaService::new(provider, GenerationConfig::document_qa())
    }

    #[tokio::test]
    async fn test_pipeline_runs_steps_in_order() {
        let provider = ScriptedProvider::with_replies(&[
            "Self-attention relates every token to every other token.",
            "yes",
            "yes",
            "Self-attention computes pairwise token interactions.",
        ]);
        let outcome = service(provider.clone())
            .answer("Explain self-attention scaling")
            .await
            .unwrap();

        assert_eq!(outcome.route, RetrievalRoute::Document);
        assert_eq!(
            outcome.answer,
            "Self-attention computes pairwise token interactions."
        );

        let steps: Vec<&str> = outcome.transcript.iter().map(|r| r.step).collect();
        assert_eq!(
            steps,
            vec!["retrieve", "grade_relevance", "grade_grounding", "answer"]
        );
        assert_eq!(provider.call_count(), 4);
    }

    #[tokio::test]
    async fn test_routing_reaches_the_prompts() {
        let provider =
            ScriptedProvider::with_replies(&["retrieved", "yes", "no", "final answer"]);
        let outcome = service(provider.clone())
            .answer("What is the weather in Paris?")
            .await
            .unwrap();

        assert_eq!(outcome.route, RetrievalRoute::WebSearch);
        assert!(provider.prompt_of_call(0).contains("web_search"));
        // The final prompt carries the parsed verdicts.
        let final_prompt = provider.prompt_of_call(3);
        assert!(final_prompt.contains("Relevance verdict: yes"));
        assert!(final_prompt.contains("Grounding verdict: no"));
    }

    #[tokio::test]
    async fn test_empty_question_never_calls_the_provider() {
        let provider = ScriptedProvider::with_replies(&["unused"]);
        let err = service(provider.clone()).answer("  ").await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_mid_pipeline_aborts_without_answer() {
        // Script covers only the first two steps; the third call fails.
        let provider = ScriptedProvider::with_replies(&["retrieved", "yes"]);
        let err = service(provider.clone())
            .answer("anything at all")
            .await
            .unwrap_err();

        assert!(err.is_provider());
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_custom_router_is_used() {
        let provider = ScriptedProvider::with_replies(&["r", "yes", "yes", "a"]);
        let outcome = service(provider.clone())
            .with_router(QuestionRouter::new("borrow checker"))
            .answer("Why does the borrow checker complain here?")
            .await
            .unwrap();

        assert_eq!(outcome.route, RetrievalRoute::Document);
    }

    #[test]
    fn test_verdict_parsing_is_lenient() {
        assert_eq!(Verdict::parse("Yes."), Verdict::Yes);
        assert_eq!(Verdict::parse("YES, it is relevant"), Verdict::Yes);
        assert_eq!(Verdict::parse("no"), Verdict::No);
        assert_eq!(Verdict::parse("cannot determine"), Verdict::No);
    }
}
