//! Generation requests and the caller-supplied inputs they carry.
//!
//! A request is built fresh per façade call and checked with
//! [`GenerationRequest::validate`] before any provider is contacted.

use crate::core::error::DomainError;
use crate::core::task::GenerationTask;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound for requested item counts (questions, cards).
pub const MAX_ITEMS: usize = 50;

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_input(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

fn require_count(field: &str, count: usize) -> Result<(), DomainError> {
    if count == 0 || count > MAX_ITEMS {
        return Err(DomainError::invalid_input(format!(
            "{} must be between 1 and {}, got {}",
            field, MAX_ITEMS, count
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRequest {
    pub topic: String,
    pub detailed: bool,
}

impl ModuleRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            detailed: false,
        }
    }

    pub fn detailed(mut self) -> Self {
        self.detailed = true;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("topic", &self.topic)
    }
}

/// Quiz request; with `source_content` the quiz is built from a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub topic: String,
    pub count: usize,
    pub source_content: Option<String>,
}

impl QuizRequest {
    pub fn new(topic: impl Into<String>, count: usize) -> Self {
        Self {
            topic: topic.into(),
            count,
            source_content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.source_content = Some(content.into());
        self
    }

    pub fn task(&self) -> GenerationTask {
        if self.source_content.is_some() {
            GenerationTask::QuizFromContent
        } else {
            GenerationTask::Quiz
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("topic", &self.topic)?;
        require_count("question count", self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardRequest {
    pub topic: String,
    pub count: usize,
}

impl FlashcardRequest {
    pub fn new(topic: impl Into<String>, count: usize) -> Self {
        Self {
            topic: topic.into(),
            count,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("topic", &self.topic)?;
        require_count("card count", self.count)
    }
}

/// Conversation context picked by the learner before chatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatContext {
    pub topic: Option<String>,
    pub level: Option<String>,
    pub focus: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub context: ChatContext,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, context: ChatContext) -> Self {
        Self {
            message: message.into(),
            context,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("message", &self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningPathRequest {
    pub goal: String,
    pub detailed: bool,
}

impl LearningPathRequest {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            detailed: false,
        }
    }

    pub fn detailed(mut self) -> Self {
        self.detailed = true;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("goal", &self.goal)
    }
}

/// Learner profile collected at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub career_goal: Option<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    /// Question id → single-letter answer (`A`..`E`).
    pub quiz_answers: BTreeMap<String, String>,
}

impl UserProfile {
    pub const DEFAULT_GOAL: &'static str = "tech career";

    /// The stated goal, or a generic one when none was given.
    pub fn goal(&self) -> &str {
        self.career_goal
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(Self::DEFAULT_GOAL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerPathRequest {
    pub profile: UserProfile,
}

impl CareerPathRequest {
    pub fn new(profile: UserProfile) -> Self {
        Self { profile }
    }
}

/// Score of one recent assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssessmentScore {
    pub module_name: String,
    pub score: f64,
    pub accuracy: f64,
    pub feedback: String,
}

/// Progress snapshot for one career path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathProgress {
    pub career_name: String,
    pub progress: u32,
    pub modules: Vec<String>,
    pub completed_modules: Vec<String>,
    pub recommended_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NudgeRequest {
    pub path: Option<PathProgress>,
    pub assessments: Vec<AssessmentScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryRequest {
    pub user: UserProfile,
    pub career_path: PathProgress,
    pub assessments: Vec<AssessmentScore>,
}

/// A single generation request, one variant per façade operation.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Module(ModuleRequest),
    Quiz(QuizRequest),
    Flashcards(FlashcardRequest),
    Chat(ChatRequest),
    LearningPath(LearningPathRequest),
    CareerPaths(CareerPathRequest),
    Nudges(NudgeRequest),
    Summary(SummaryRequest),
}

impl GenerationRequest {
    pub fn task(&self) -> GenerationTask {
        match self {
            GenerationRequest::Module(_) => GenerationTask::ModuleContent,
            GenerationRequest::Quiz(q) => q.task(),
            GenerationRequest::Flashcards(_) => GenerationTask::FlashcardSet,
            GenerationRequest::Chat(_) => GenerationTask::ChatReply,
            GenerationRequest::LearningPath(_) => GenerationTask::LearningPathSkeleton,
            GenerationRequest::CareerPaths(_) => GenerationTask::CareerPathSet,
            GenerationRequest::Nudges(_) => GenerationTask::NudgeSet,
            GenerationRequest::Summary(_) => GenerationTask::NarrativeSummary,
        }
    }

    /// Check required parameters; fails fast before any network call.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            GenerationRequest::Module(r) => r.validate(),
            GenerationRequest::Quiz(r) => r.validate(),
            GenerationRequest::Flashcards(r) => r.validate(),
            GenerationRequest::Chat(r) => r.validate(),
            GenerationRequest::LearningPath(r) => r.validate(),
            GenerationRequest::CareerPaths(_)
            | GenerationRequest::Nudges(_)
            | GenerationRequest::Summary(_) => Ok(()),
        }
    }
}
