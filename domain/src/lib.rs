//! Domain layer for coursegen
//!
//! This crate contains the content shapes and the pure logic that turns
//! raw model text into trusted structured content. It has no dependencies
//! on infrastructure or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Pipeline
//!
//! Raw text → [`sanitize::extract_json`] → [`shape::accept`] (coerce,
//! validate, normalize, validate strictly). When generation fails, the
//! [`FallbackSynthesizer`] builds content that passes the same checks.
//!
//! ## Origin
//!
//! Every result is tagged [`Origin::Generated`] or [`Origin::Fallback`];
//! the content schema is identical for both.

pub mod config;
pub mod content;
pub mod core;
pub mod fallback;
pub mod profile;
pub mod prompt;
pub mod providers;
pub mod sanitize;
pub mod shape;
pub mod topic;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use content::{
    CareerModule, CareerPath, CareerPathSet, CodeExample, ContentKind, Difficulty, Flashcard,
    FlashcardSet, GenerationResult, LearningPath, ModuleContent, NarrativeSummary, Nudge,
    NudgeIcon, NudgeSet, NudgeType, Origin, PathModule, QuestionType, Quiz, QuizQuestion, Section,
};
pub use core::{
    candidate::ModelCandidate,
    error::DomainError,
    request::{
        AssessmentScore, CareerPathRequest, ChatContext, ChatRequest, FlashcardRequest,
        GenerationRequest, LearningPathRequest, ModuleRequest, NudgeRequest, PathProgress,
        QuizRequest, SummaryRequest, UserProfile,
    },
    task::GenerationTask,
};
pub use fallback::FallbackSynthesizer;
pub use profile::{InterestCategory, InterestProfile};
pub use prompt::PromptTemplate;
pub use providers::{HttpProviderConfig, ProviderConfig, ProviderKind};
pub use sanitize::{UnparsableResponse, extract_json};
pub use shape::{Accepted, ContentShape};
pub use validation::{ContentValidator, CountRule, ValidationRejected, ValidationResult};
