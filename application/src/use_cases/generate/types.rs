//! Error and output types of the generation use case.

use crate::use_cases::router::RouterError;
use coursegen_domain::{
    CareerPathSet, DomainError, FlashcardSet, GenerationResult, LearningPath, ModuleContent,
    NarrativeSummary, NudgeSet, Quiz,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Why one attempt (one router pass) failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("Attempt timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Errors surfaced to callers of the façade.
///
/// Provider failures never appear here: content operations fall back
/// instead, and chat reports a generic [`GenerationError::ChatUnavailable`].
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    InvalidInput(#[from] DomainError),

    #[error("The assistant is unavailable right now, please try again")]
    ChatUnavailable,

    #[error("Misconfigured: {0}")]
    Misconfigured(String),
}

/// Output of [`GenerationService::generate`](super::GenerationService::generate).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeneratedContent {
    Module(GenerationResult<ModuleContent>),
    Quiz(GenerationResult<Quiz>),
    Flashcards(GenerationResult<FlashcardSet>),
    Chat(String),
    LearningPath(GenerationResult<LearningPath>),
    CareerPaths(GenerationResult<CareerPathSet>),
    Nudges(GenerationResult<NudgeSet>),
    Summary(GenerationResult<NarrativeSummary>),
}

impl GeneratedContent {
    /// Whether the content was synthesized locally.
    pub fn is_fallback(&self) -> bool {
        match self {
            GeneratedContent::Module(r) => r.is_fallback(),
            GeneratedContent::Quiz(r) => r.is_fallback(),
            GeneratedContent::Flashcards(r) => r.is_fallback(),
            GeneratedContent::Chat(_) => false,
            GeneratedContent::LearningPath(r) => r.is_fallback(),
            GeneratedContent::CareerPaths(r) => r.is_fallback(),
            GeneratedContent::Nudges(r) => r.is_fallback(),
            GeneratedContent::Summary(r) => r.is_fallback(),
        }
    }
}
