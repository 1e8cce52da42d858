//! Generation use case.
//!
//! [`GenerationService`] is the façade the rest of the application calls:
//! one operation per content shape. Every operation runs the same pipeline:
//!
//! 1. validate the request (fails fast, no network)
//! 2. build the prompt
//! 3. router pass: each candidate's text is sanitized and validated;
//!    a candidate whose text is unusable counts as failed
//! 4. repeat the pass under the task's [`RetryPolicy`](crate::config::RetryPolicy)
//! 5. on exhaustion, synthesize a fallback (chat excepted)
//!
//! Results never carry provider or model identity; those only reach
//! `tracing` logs and the [`GenerationLogger`].

mod types;

pub use types::{AttemptError, GeneratedContent, GenerationError};

use crate::config::GenerationConfig;
use crate::ports::generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::retry::with_retries;
use crate::use_cases::router::{CandidateError, ModelRouter, RawModelResponse};
use coursegen_domain::shape::{self, Accepted, ContentShape};
use coursegen_domain::{
    CareerPathRequest, CareerPathSet, ChatRequest, ContentValidator, CountRule, FlashcardRequest,
    FlashcardSet, GenerationRequest, GenerationResult, GenerationTask, LearningPath,
    LearningPathRequest, ModelCandidate, ModuleContent, ModuleRequest, NarrativeSummary,
    NudgeRequest, NudgeSet, PromptTemplate, Quiz, QuizRequest, SummaryRequest, extract_json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Façade over router, sanitizer, validator and fallback.
pub struct GenerationService {
    router: ModelRouter,
    config: Arc<GenerationConfig>,
    logger: Arc<dyn GenerationLogger>,
}

impl Clone for GenerationService {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            config: self.config.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl GenerationService {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: GenerationConfig) -> Self {
        Self {
            router: ModelRouter::new(gateway),
            config: Arc::new(config),
            logger: Arc::new(NoGenerationLogger),
        }
    }

    /// Create with a generation event logger.
    pub fn with_generation_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.router = self.router.with_generation_logger(logger.clone());
        self.logger = logger;
        self
    }

    /// A copy of this service that tries `candidates` for `task`.
    ///
    /// Used to override the configured order for a single call.
    pub fn with_candidates(&self, task: GenerationTask, candidates: Vec<ModelCandidate>) -> Self {
        let config = (*self.config).clone().with_candidates(task, candidates);
        Self {
            config: Arc::new(config),
            ..self.clone()
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    // ==================== Operations ====================

    pub async fn generate_module_content(
        &self,
        request: ModuleRequest,
    ) -> Result<GenerationResult<ModuleContent>, GenerationError> {
        request.validate()?;
        let prompt = PromptTemplate::module_content(&request);
        self.generate_shape::<ModuleContent>(&prompt, &request).await
    }

    /// Quiz from a topic, or from module content when the request has some.
    pub async fn generate_quiz(
        &self,
        request: QuizRequest,
    ) -> Result<GenerationResult<Quiz>, GenerationError> {
        request.validate()?;
        let prompt = PromptTemplate::quiz(&request);
        self.generate_shape::<Quiz>(&prompt, &request).await
    }

    pub async fn generate_flashcards(
        &self,
        request: FlashcardRequest,
    ) -> Result<GenerationResult<FlashcardSet>, GenerationError> {
        request.validate()?;
        let prompt = PromptTemplate::flashcards(&request);
        self.generate_shape::<FlashcardSet>(&prompt, &request).await
    }

    /// Reply to a learner's chat message.
    ///
    /// Unlike the other operations this one has no fallback: when every
    /// attempt fails the caller gets [`GenerationError::ChatUnavailable`].
    pub async fn chat_reply(&self, request: ChatRequest) -> Result<String, GenerationError> {
        request.validate()?;
        let task = GenerationTask::ChatReply;
        let candidates = self.candidates(task)?;
        let prompt = PromptTemplate::chat(&request);
        let prompt = prompt.as_str();

        let outcome = with_retries(self.config.retry_for(task), move |attempt| {
            self.attempt(task, prompt, candidates, attempt, move |raw: &RawModelResponse| {
                let reply = Value::String(raw.text.trim().to_string());
                ContentValidator::validate(task, &reply, CountRule::AtLeast(1)).into_result(task)?;
                Ok(raw.text.trim().to_string())
            })
        })
        .await;

        outcome.map_err(|e| {
            warn!("Chat reply unavailable: {}", e);
            GenerationError::ChatUnavailable
        })
    }

    pub async fn generate_learning_path(
        &self,
        request: LearningPathRequest,
    ) -> Result<GenerationResult<LearningPath>, GenerationError> {
        request.validate()?;
        let prompt = PromptTemplate::learning_path(&request);
        self.generate_shape::<LearningPath>(&prompt, &request).await
    }

    /// Four personalized career paths; the prompt carries the learner's
    /// interest profile when quiz answers are present.
    pub async fn generate_career_paths(
        &self,
        request: CareerPathRequest,
    ) -> Result<GenerationResult<CareerPathSet>, GenerationError> {
        let prompt = PromptTemplate::career_paths(&request);
        self.generate_shape::<CareerPathSet>(&prompt, &request).await
    }

    pub async fn generate_nudges(
        &self,
        request: NudgeRequest,
    ) -> Result<GenerationResult<NudgeSet>, GenerationError> {
        let prompt = PromptTemplate::nudges(&request);
        self.generate_shape::<NudgeSet>(&prompt, &request).await
    }

    pub async fn generate_narrative_summary(
        &self,
        request: SummaryRequest,
    ) -> Result<GenerationResult<NarrativeSummary>, GenerationError> {
        let prompt = PromptTemplate::narrative_summary(&request);
        self.generate_shape::<NarrativeSummary>(&prompt, &request).await
    }

    /// Dispatch a request to its operation.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GeneratedContent, GenerationError> {
        Ok(match request {
            GenerationRequest::Module(r) => {
                GeneratedContent::Module(self.generate_module_content(r).await?)
            }
            GenerationRequest::Quiz(r) => GeneratedContent::Quiz(self.generate_quiz(r).await?),
            GenerationRequest::Flashcards(r) => {
                GeneratedContent::Flashcards(self.generate_flashcards(r).await?)
            }
            GenerationRequest::Chat(r) => GeneratedContent::Chat(self.chat_reply(r).await?),
            GenerationRequest::LearningPath(r) => {
                GeneratedContent::LearningPath(self.generate_learning_path(r).await?)
            }
            GenerationRequest::CareerPaths(r) => {
                GeneratedContent::CareerPaths(self.generate_career_paths(r).await?)
            }
            GenerationRequest::Nudges(r) => {
                GeneratedContent::Nudges(self.generate_nudges(r).await?)
            }
            GenerationRequest::Summary(r) => {
                GeneratedContent::Summary(self.generate_narrative_summary(r).await?)
            }
        })
    }

    // ==================== Pipeline ====================

    fn candidates(&self, task: GenerationTask) -> Result<&[ModelCandidate], GenerationError> {
        let candidates = self.config.candidates_for(task);
        if candidates.is_empty() {
            return Err(GenerationError::Misconfigured(format!(
                "no model candidates configured for {}",
                task
            )));
        }
        Ok(candidates)
    }

    /// Run the retried pipeline for a shape, falling back on exhaustion.
    async fn generate_shape<S: ContentShape>(
        &self,
        prompt: &str,
        params: &S::Params,
    ) -> Result<GenerationResult<S>, GenerationError> {
        let task = S::task(params);
        let candidates = self.candidates(task)?;
        info!("Generating {}", task);

        let outcome = with_retries(self.config.retry_for(task), move |attempt| {
            self.attempt(task, prompt, candidates, attempt, move |raw: &RawModelResponse| {
                accept_text::<S>(task, &raw.text, params)
            })
        })
        .await;

        match outcome {
            Ok(Accepted { content, notes }) => {
                for note in notes {
                    warn!("{}: {}", task, note);
                }
                Ok(GenerationResult::generated(content))
            }
            Err(e) => Ok(self.fallback::<S>(params, &e)),
        }
    }

    /// One router pass, raced against the task's timeout when it has one.
    async fn attempt<T, F>(
        &self,
        task: GenerationTask,
        prompt: &str,
        candidates: &[ModelCandidate],
        attempt: u32,
        accept: F,
    ) -> Result<T, AttemptError>
    where
        F: FnMut(&RawModelResponse) -> Result<T, CandidateError>,
    {
        let pass = self
            .router
            .try_generate_with(task, prompt, candidates, accept);

        let result = match self.config.timeout_for(task) {
            Some(limit) => match tokio::time::timeout(limit, pass).await {
                Ok(result) => result.map_err(AttemptError::from),
                Err(_) => Err(AttemptError::TimedOut(limit)),
            },
            None => pass.await.map_err(AttemptError::from),
        };

        match result {
            Ok((_, value)) => Ok(value),
            Err(e) => {
                self.logger
                    .log(GenerationEvent::attempt_failed(task, attempt, &e.to_string()));
                Err(e)
            }
        }
    }

    fn fallback<S: ContentShape>(
        &self,
        params: &S::Params,
        cause: &AttemptError,
    ) -> GenerationResult<S> {
        let task = S::task(params);
        warn!("Using fallback content for {}: {}", task, cause);

        let content = S::fallback(params);
        let check = shape::check(&content, params);
        if !check.is_valid() {
            error!(
                "Fallback content for {} failed validation: {}",
                task,
                check.reason.as_deref().unwrap_or("unknown reason")
            );
        }

        self.logger
            .log(GenerationEvent::fallback_used(task, &cause.to_string()));
        GenerationResult::fallback(content)
    }
}

/// Sanitize (JSON tasks) and accept one candidate's text.
fn accept_text<S: ContentShape>(
    task: GenerationTask,
    text: &str,
    params: &S::Params,
) -> Result<Accepted<S>, CandidateError> {
    let payload = if task.expects_json() {
        extract_json(text)?
    } else {
        Value::String(text.trim().to_string())
    };
    Ok(shape::accept::<S>(payload, params)?)
}

#[cfg(test)]
mod tests;
