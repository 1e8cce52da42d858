//! Model router.
//!
//! Walks a task's candidates in priority order, issuing exactly one call per
//! candidate and stopping at the first usable response. A candidate is never
//! retried within a pass; whole-pass retries belong to
//! [`with_retries`](super::retry::with_retries).

use crate::ports::generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use coursegen_domain::core::candidate::ordered;
use coursegen_domain::{
    GenerationTask, ModelCandidate, ProviderKind, UnparsableResponse, ValidationRejected,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Text returned by the first candidate that answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse {
    pub provider: ProviderKind,
    pub model: String,
    pub text: String,
    pub latency: Duration,
}

/// Why a single candidate was abandoned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CandidateError {
    #[error(transparent)]
    Provider(#[from] GatewayError),

    #[error(transparent)]
    Unparsable(#[from] UnparsableResponse),

    #[error(transparent)]
    Rejected(#[from] ValidationRejected),
}

/// One entry of the per-candidate failure list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    pub provider: ProviderKind,
    pub model: String,
    pub error: CandidateError,
}

impl std::fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.provider, self.model, self.error)
    }
}

/// Errors that end a router pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Configuration error: the task has nothing to try.
    #[error("No candidates configured for {0}")]
    NoCandidates(GenerationTask),

    #[error("All {} candidates failed for {task}", failures.len())]
    Exhausted {
        task: GenerationTask,
        failures: Vec<CandidateFailure>,
    },
}

impl RouterError {
    /// Per-candidate failures of an exhausted pass.
    pub fn failures(&self) -> &[CandidateFailure] {
        match self {
            RouterError::NoCandidates(_) => &[],
            RouterError::Exhausted { failures, .. } => failures,
        }
    }
}

/// Tries candidates in priority order until one answers.
pub struct ModelRouter {
    gateway: Arc<dyn LlmGateway>,
    logger: Arc<dyn GenerationLogger>,
}

impl Clone for ModelRouter {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl ModelRouter {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            logger: Arc::new(NoGenerationLogger),
        }
    }

    pub fn with_generation_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Return the first non-empty completion.
    pub async fn try_generate(
        &self,
        task: GenerationTask,
        prompt: &str,
        candidates: &[ModelCandidate],
    ) -> Result<RawModelResponse, RouterError> {
        self.try_generate_with(task, prompt, candidates, |_| Ok(()))
            .await
            .map(|(raw, ())| raw)
    }

    /// Return the first completion that `accept` turns into a value.
    ///
    /// A response rejected by `accept` is recorded like a provider failure
    /// and the pass moves on to the next candidate.
    pub async fn try_generate_with<T, F>(
        &self,
        task: GenerationTask,
        prompt: &str,
        candidates: &[ModelCandidate],
        mut accept: F,
    ) -> Result<(RawModelResponse, T), RouterError>
    where
        F: FnMut(&RawModelResponse) -> Result<T, CandidateError>,
    {
        if candidates.is_empty() {
            return Err(RouterError::NoCandidates(task));
        }

        let mut failures = Vec::new();
        for candidate in ordered(candidates) {
            debug!("Trying {} for {}", candidate, task);
            let started = Instant::now();

            let outcome: Result<(RawModelResponse, T), CandidateError> =
                match self.gateway.complete(candidate, prompt).await {
                    Ok(text) if text.trim().is_empty() => Err(GatewayError::EmptyContent.into()),
                    Ok(text) => {
                        let raw = RawModelResponse {
                            provider: candidate.provider,
                            model: candidate.model.clone(),
                            text,
                            latency: started.elapsed(),
                        };
                        accept(&raw).map(|value| (raw, value))
                    }
                    Err(e) => Err(e.into()),
                };

            match outcome {
                Ok((raw, value)) => {
                    info!(
                        "{} answered by {} in {}ms",
                        task,
                        candidate,
                        raw.latency.as_millis()
                    );
                    self.logger
                        .log(GenerationEvent::generated(task, candidate, raw.latency));
                    return Ok((raw, value));
                }
                Err(error) => {
                    warn!("Candidate {} failed for {}: {}", candidate, task, error);
                    if let CandidateError::Unparsable(e) = &error {
                        debug!("Unparsable text from {}: {}", candidate, e.preview());
                    }
                    self.logger.log(GenerationEvent::candidate_failed(
                        task,
                        candidate,
                        &error.to_string(),
                    ));
                    failures.push(CandidateFailure {
                        provider: candidate.provider,
                        model: candidate.model.clone(),
                        error,
                    });
                }
            }
        }

        Err(RouterError::Exhausted { task, failures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ==================== Mock Gateway ====================

    /// Answers per model name; records the call order.
    struct ScriptedGateway {
        answers: Vec<(&'static str, Result<String, GatewayError>)>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(answers: Vec<(&'static str, Result<String, GatewayError>)>) -> Self {
            Self {
                answers,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn complete(
            &self,
            candidate: &ModelCandidate,
            _prompt: &str,
        ) -> Result<String, GatewayError> {
            self.calls.lock().unwrap().push(candidate.model.clone());
            self.answers
                .iter()
                .find(|(model, _)| *model == candidate.model)
                .map(|(_, answer)| answer.clone())
                .unwrap_or(Err(GatewayError::Network("unscripted".into())))
        }
    }

    fn candidates(models: &[&str]) -> Vec<ModelCandidate> {
        models
            .iter()
            .enumerate()
            .map(|(i, m)| ModelCandidate::new(ProviderKind::Groq, *m, i as u32))
            .collect()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_first_success_stops_the_pass() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            ("a", Ok("first".into())),
            ("b", Ok("second".into())),
        ]));
        let router = ModelRouter::new(gateway.clone());

        let raw = router
            .try_generate(GenerationTask::Quiz, "p", &candidates(&["a", "b"]))
            .await
            .unwrap();

        assert_eq!(raw.text, "first");
        assert_eq!(raw.model, "a");
        assert_eq!(gateway.calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_failures_move_to_next_candidate_once_each() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            (
                "a",
                Err(GatewayError::Http {
                    status: 503,
                    message: "overloaded".into(),
                }),
            ),
            ("b", Ok("   ".into())),
            ("c", Ok("ok".into())),
        ]));
        let router = ModelRouter::new(gateway.clone());

        let raw = router
            .try_generate(GenerationTask::Quiz, "p", &candidates(&["a", "b", "c"]))
            .await
            .unwrap();

        assert_eq!(raw.model, "c");
        assert_eq!(gateway.calls(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_priority_order_not_list_order() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            ("low", Ok("low".into())),
            ("high", Ok("high".into())),
        ]));
        let router = ModelRouter::new(gateway.clone());
        let list = vec![
            ModelCandidate::new(ProviderKind::Groq, "low", 5),
            ModelCandidate::new(ProviderKind::Gemini, "high", 1),
        ];

        let raw = router
            .try_generate(GenerationTask::Quiz, "p", &list)
            .await
            .unwrap();

        assert_eq!(raw.provider, ProviderKind::Gemini);
        assert_eq!(gateway.calls(), vec!["high"]);
    }

    #[tokio::test]
    async fn test_exhausted_carries_every_failure() {
        let gateway = Arc::new(ScriptedGateway::new(vec![(
            "b",
            Err(GatewayError::Timeout),
        )]));
        let router = ModelRouter::new(gateway);

        let err = router
            .try_generate(GenerationTask::NudgeSet, "p", &candidates(&["a", "b"]))
            .await
            .unwrap_err();

        let failures = err.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].model, "a");
        assert!(matches!(
            failures[1].error,
            CandidateError::Provider(GatewayError::Timeout)
        ));
        assert!(err.to_string().contains("All 2 candidates failed"));
    }

    #[tokio::test]
    async fn test_empty_candidate_list_is_an_error() {
        let router = ModelRouter::new(Arc::new(ScriptedGateway::new(vec![])));
        let err = router
            .try_generate(GenerationTask::Quiz, "p", &[])
            .await
            .unwrap_err();
        assert_eq!(err, RouterError::NoCandidates(GenerationTask::Quiz));
    }

    #[tokio::test]
    async fn test_rejected_response_moves_to_next_candidate() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            ("a", Ok("prose only".into())),
            ("b", Ok("{\"ok\": true}".into())),
        ]));
        let router = ModelRouter::new(gateway.clone());

        let (raw, value) = router
            .try_generate_with(
                GenerationTask::Quiz,
                "p",
                &candidates(&["a", "b"]),
                |raw| coursegen_domain::extract_json(&raw.text).map_err(CandidateError::from),
            )
            .await
            .unwrap();

        assert_eq!(raw.model, "b");
        assert_eq!(value["ok"], true);
        assert_eq!(gateway.calls(), vec!["a", "b"]);
    }
}
