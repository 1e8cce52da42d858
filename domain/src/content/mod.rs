//! Structured content shapes returned to callers.
//!
//! Every shape serializes to the same JSON whether it came from a model or
//! from the fallback synthesizer; only the [`origin::Origin`] tag differs.

pub mod career;
pub mod flashcard;
pub mod learning_path;
pub mod module;
pub mod nudge;
pub mod origin;
pub mod quiz;
pub mod summary;

pub use career::{CareerModule, CareerPath, CareerPathSet, Difficulty};
pub use flashcard::{Flashcard, FlashcardSet};
pub use learning_path::{LearningPath, PathModule};
pub use module::{CodeExample, ContentKind, ModuleContent, Section};
pub use nudge::{Nudge, NudgeIcon, NudgeSet, NudgeType};
pub use origin::{GenerationResult, Origin};
pub use quiz::{QuestionType, Quiz, QuizQuestion};
pub use summary::NarrativeSummary;
