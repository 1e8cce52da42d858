//! Generation task value object

use serde::{Deserialize, Serialize};

/// The content shape a generation request produces (Value Object)
///
/// A task selects the prompt template, the validator and the fallback
/// synthesizer used for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationTask {
    ModuleContent,
    Quiz,
    QuizFromContent,
    FlashcardSet,
    ChatReply,
    LearningPathSkeleton,
    CareerPathSet,
    NudgeSet,
    NarrativeSummary,
}

impl GenerationTask {
    pub const ALL: [GenerationTask; 9] = [
        GenerationTask::ModuleContent,
        GenerationTask::Quiz,
        GenerationTask::QuizFromContent,
        GenerationTask::FlashcardSet,
        GenerationTask::ChatReply,
        GenerationTask::LearningPathSkeleton,
        GenerationTask::CareerPathSet,
        GenerationTask::NudgeSet,
        GenerationTask::NarrativeSummary,
    ];

    /// Configuration key for this task (e.g. `[generation.candidates]`)
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationTask::ModuleContent => "module_content",
            GenerationTask::Quiz => "quiz",
            GenerationTask::QuizFromContent => "quiz_from_content",
            GenerationTask::FlashcardSet => "flashcards",
            GenerationTask::ChatReply => "chat_reply",
            GenerationTask::LearningPathSkeleton => "learning_path",
            GenerationTask::CareerPathSet => "career_paths",
            GenerationTask::NudgeSet => "nudges",
            GenerationTask::NarrativeSummary => "narrative_summary",
        }
    }

    /// Whether the model is expected to answer with JSON.
    ///
    /// Plain-text tasks skip the response sanitizer.
    pub fn expects_json(&self) -> bool {
        !matches!(
            self,
            GenerationTask::ChatReply | GenerationTask::NarrativeSummary
        )
    }

    /// Whether a synthetic result may stand in for a failed generation.
    ///
    /// A fabricated chat reply would be misleading, so chat surfaces an
    /// error instead.
    pub fn has_fallback(&self) -> bool {
        !matches!(self, GenerationTask::ChatReply)
    }
}

impl std::fmt::Display for GenerationTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GenerationTask {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GenerationTask::ALL
            .iter()
            .copied()
            .find(|task| task.as_str() == s.trim())
            .ok_or_else(|| format!("unknown generation task '{}'", s))
    }
}
