//! Learning-path generation service.

use crate::prompts;
use sage_core::Result;
use sage_core::config::GenerationConfig;
use sage_core::plan::{LearningPath, LearningPathRequest};
use sage_interaction::{ChatMessage, CompletionProvider, CompletionRequest};
use std::sync::Arc;

/// Generates multi-week learning paths.
///
/// One completion call is made per week for its focus line; the activity
/// schedule is computed deterministically from the request and needs no
/// model call.
pub struct LearningPathService {
    provider: Arc<dyn CompletionProvider>,
    generation: GenerationConfig,
}

impl LearningPathService {
    /// Creates a learning-path service with the given provider and sampling
    /// parameters.
    pub fn new(provider: Arc<dyn CompletionProvider>, generation: GenerationConfig) -> Self {
        Self {
            provider,
            generation,
        }
    }

    /// Generates a complete plan for the request.
    ///
    /// The request is validated first; an invalid request never reaches the
    /// provider. A provider failure on any week aborts the whole generation;
    /// no partial plan is returned or cached.
    ///
    /// # Errors
    ///
    /// - `SageError::Validation` for an out-of-bounds or empty request
    /// - `SageError::Provider` if any weekly-focus call fails
    pub async fn generate(&self, request: &LearningPathRequest) -> Result<LearningPath> {
        request.validate()?;

        tracing::info!(
            topic = %request.topic,
            weeks = request.duration_weeks,
            hours_per_week = request.hours_per_week,
            "generating learning path"
        );

        let mut focuses = Vec::with_capacity(request.duration_weeks as usize);
        for week in 1..=request.duration_weeks {
            let prompt = prompts::weekly_focus(request, week)?;
            let completion_request = CompletionRequest::from_generation(
                vec![ChatMessage::user(prompt)],
                &self.generation,
            );
            let focus = self.provider.complete(completion_request).await?;
            focuses.push(focus.trim().to_string());
        }

        Ok(LearningPath::assemble(request, focuses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sage_interaction::ProviderError;
    use std::sync::Mutex;

    /// Replies with a numbered focus line per call, optionally failing at a
    /// given call index (1-based).
    struct ScriptedProvider {
        calls: Mutex<Vec<CompletionRequest>>,
        fail_at: Option<usize>,
    }

    impl ScriptedProvider {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                fail_at: None,
            })
        }

        fn failing_at(call: usize) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                fail_at: Some(call),
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
            let call_number = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(request);
                calls.len()
            };

            if self.fail_at == Some(call_number) {
                return Err(ProviderError::Transport {
                    message: "connection reset".to_string(),
                    is_retryable: true,
                });
            }

            Ok(format!("  Focus for call {}  ", call_number))
        }
    }

    fn request(duration_weeks: u32, hours_per_week: u32) -> LearningPathRequest {
        LearningPathRequest {
            topic: "Data Science".to_string(),
            focus: "Machine Learning".to_string(),
            duration_weeks,
            hours_per_week,
        }
    }

    #[tokio::test]
    async fn test_generates_one_call_per_week() {
        let provider = ScriptedProvider::new();
        let service = LearningPathService::new(provider.clone(), GenerationConfig::learning_path());

        let plan = service.generate(&request(4, 5)).await.unwrap();

        assert_eq!(provider.call_count(), 4);
        assert_eq!(plan.total_weeks, 4);
        assert_eq!(plan.total_hours, 20);
        // Focus lines arrive trimmed and in week order.
        assert_eq!(plan.weeks[0].focus, "Focus for call 1");
        assert_eq!(plan.weeks[3].focus, "Focus for call 4");
    }

    #[tokio::test]
    async fn test_each_prompt_names_its_week() {
        let provider = ScriptedProvider::new();
        let service = LearningPathService::new(provider.clone(), GenerationConfig::learning_path());

        service.generate(&request(3, 6)).await.unwrap();

        for week in 1..=3usize {
            let prompt = provider.prompt_of_call(week - 1);
            assert!(prompt.contains(&format!("week {} of 3 weeks", week)));
            assert!(prompt.contains("Data Science"));
        }
    }

    #[tokio::test]
    async fn test_invalid_request_never_calls_the_provider() {
        let provider = ScriptedProvider::new();
        let service = LearningPathService::new(provider.clone(), GenerationConfig::learning_path());

        let err = service.generate(&request(0, 5)).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(provider.call_count(), 0);

        let err = service.generate(&request(4, 99)).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_mid_generation_aborts_without_partial_plan() {
        let provider = ScriptedProvider::failing_at(3);
        let service = LearningPathService::new(provider.clone(), GenerationConfig::learning_path());

        let err = service.generate(&request(6, 5)).await.unwrap_err();

        assert!(err.is_provider());
        // Generation stopped at the failing week; later weeks were never requested.
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_activity_schedule_is_deterministic() {
        let provider = ScriptedProvider::new();
        let service = LearningPathService::new(provider.clone(), GenerationConfig::learning_path());

        let plan = service.generate(&request(2, 5)).await.unwrap();

        for week in &plan.weeks {
            let hours: Vec<f64> = week.activities.iter().map(|a| a.hours).collect();
            assert_eq!(hours, vec![1.5, 2.0, 1.5]);
        }
        // Two weeks, but only two provider calls: activities never hit the model.
        assert_eq!(provider.call_count(), 2);
    }
}
