//! Content validator: structural and minimal semantic checks per task.
//!
//! Validators are pure predicates over a parsed payload. They never mutate
//! it; they answer valid or invalid with a reason for the logs. Soft
//! issues (for example an over-long nudge) are reported as notes on an
//! otherwise valid result.

mod shapes;

use crate::core::task::GenerationTask;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Outcome of validating one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub reason: Option<String>,
    /// Soft issues worth logging that do not reject the payload.
    pub notes: Vec<String>,
}

impl ValidationResult {
    pub fn accept() -> Self {
        Self {
            valid: true,
            reason: None,
            notes: Vec::new(),
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
            notes: Vec::new(),
        }
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Convert into a `Result`, attaching the task to the rejection.
    pub fn into_result(self, task: GenerationTask) -> Result<Vec<String>, ValidationRejected> {
        if self.valid {
            Ok(self.notes)
        } else {
            Err(ValidationRejected {
                task,
                reason: self.reason.unwrap_or_else(|| "rejected".to_string()),
            })
        }
    }
}

impl From<Result<(), String>> for ValidationResult {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => ValidationResult::accept(),
            Err(reason) => ValidationResult::reject(reason),
        }
    }
}

/// A parsed payload did not satisfy its task's shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{task} payload rejected: {reason}")]
pub struct ValidationRejected {
    pub task: GenerationTask,
    pub reason: String,
}

/// Expected number of items in a payload's top-level list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountRule {
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl CountRule {
    pub fn check(&self, what: &str, len: usize) -> Result<(), String> {
        let ok = match *self {
            CountRule::Exactly(n) => len == n,
            CountRule::AtLeast(n) => len >= n,
            CountRule::Between(lo, hi) => (lo..=hi).contains(&len),
        };
        if ok {
            Ok(())
        } else {
            Err(format!("expected {} {}, got {}", self, what, len))
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, CountRule::Exactly(_))
    }
}

impl fmt::Display for CountRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountRule::Exactly(n) => write!(f, "exactly {}", n),
            CountRule::AtLeast(n) => write!(f, "at least {}", n),
            CountRule::Between(lo, hi) => write!(f, "{}-{}", lo, hi),
        }
    }
}

/// Dispatches a payload to the validator of its task.
pub struct ContentValidator;

impl ContentValidator {
    /// Validate `payload` for `task`, holding its item list to `items`.
    ///
    /// Nested lists (modules of a career path) are held to their exact
    /// size only when `items` is exact.
    pub fn validate(task: GenerationTask, payload: &Value, items: CountRule) -> ValidationResult {
        match task {
            GenerationTask::ModuleContent => shapes::module_content(payload).into(),
            GenerationTask::Quiz | GenerationTask::QuizFromContent => {
                shapes::quiz(payload, items).into()
            }
            GenerationTask::FlashcardSet => shapes::flashcards(payload, items).into(),
            GenerationTask::LearningPathSkeleton => shapes::learning_path(payload, items).into(),
            GenerationTask::CareerPathSet => shapes::career_paths(payload, items).into(),
            GenerationTask::NudgeSet => match shapes::nudges(payload, items) {
                Ok(notes) => ValidationResult::accept().with_notes(notes),
                Err(reason) => ValidationResult::reject(reason),
            },
            GenerationTask::ChatReply | GenerationTask::NarrativeSummary => {
                shapes::plain_text(payload).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GenerationTask as T;
    use serde_json::json;

    fn check(task: GenerationTask, payload: &Value, items: CountRule) -> ValidationResult {
        ContentValidator::validate(task, payload, items)
    }

    fn question(options: Value, correct: Value) -> Value {
        json!({
            "question": "What is a BST?",
            "options": options,
            "correctAnswer": correct,
            "explanation": "Ordered binary tree."
        })
    }

    fn section(content: &str) -> Value {
        json!({"title": "Basics", "content": content})
    }

    const LONG: &str = "A binary search tree keeps smaller keys to the left and larger keys to the right.";

    #[test]
    fn test_module_content_valid() {
        let payload = json!({"title": "BSTs", "sections": [section(LONG)]});
        assert!(check(T::ModuleContent, &payload, CountRule::AtLeast(1)).is_valid());
    }

    #[test]
    fn test_module_content_rejections() {
        let cases = [
            json!({"title": "", "sections": [section(LONG)]}),
            json!({"title": "BSTs", "sections": []}),
            json!({"title": "BSTs", "sections": [section("too short")]}),
            json!({"title": "BSTs", "sections": [{"title": "S", "content": LONG, "codeExample": {"language": "", "code": "x"}}]}),
        ];
        for payload in cases {
            let result = check(T::ModuleContent, &payload, CountRule::AtLeast(1));
            assert!(!result.is_valid(), "accepted {}", payload);
            assert!(result.reason.is_some());
        }
    }

    #[test]
    fn test_module_null_code_example_is_fine() {
        let payload = json!({"title": "History", "sections": [{"title": "S", "content": LONG, "codeExample": null}]});
        assert!(check(T::ModuleContent, &payload, CountRule::AtLeast(1)).is_valid());
    }

    #[test]
    fn test_quiz_count_rule() {
        let q = question(json!(["a", "b", "c", "d"]), json!(["b"]));
        let payload = json!({"questions": [q.clone(), q.clone(), q]});
        assert!(check(T::Quiz, &payload, CountRule::Exactly(3)).is_valid());
        let result = check(T::Quiz, &payload, CountRule::Exactly(5));
        assert_eq!(result.reason.as_deref(), Some("expected exactly 5 questions, got 3"));
    }

    #[test]
    fn test_quiz_answer_must_be_an_option() {
        let payload = json!({"questions": [question(json!(["a", "b", "c", "d"]), json!(["e"]))]});
        assert!(!check(T::Quiz, &payload, CountRule::AtLeast(1)).is_valid());
        let payload = json!({"questions": [question(json!(["a", "b", "c"]), json!(["a"]))]});
        assert!(!check(T::Quiz, &payload, CountRule::AtLeast(1)).is_valid());
        let payload = json!({"questions": [question(json!(["a", "b", "c", "d"]), json!([]))]});
        assert!(!check(T::QuizFromContent, &payload, CountRule::AtLeast(1)).is_valid());
    }

    #[test]
    fn test_flashcards() {
        let payload = json!([{"id": 1, "frontHTML": "Q?", "backHTML": "A."}]);
        assert!(check(T::FlashcardSet, &payload, CountRule::Exactly(1)).is_valid());
        let payload = json!([{"id": "one", "frontHTML": "Q?", "backHTML": "A."}]);
        assert!(!check(T::FlashcardSet, &payload, CountRule::Exactly(1)).is_valid());
        let payload = json!({"cards": []});
        assert!(!check(T::FlashcardSet, &payload, CountRule::AtLeast(1)).is_valid());
    }

    fn career_path(modules: usize) -> Value {
        let modules: Vec<Value> = (1..=modules).map(|i| json!({"title": format!("M{}", i)})).collect();
        json!({"pathName": "Data Engineering", "difficulty": "beginner", "relevanceScore": 90, "modules": modules})
    }

    #[test]
    fn test_career_paths_strict_and_lenient() {
        let payload = json!([career_path(5), career_path(5), career_path(5), career_path(5)]);
        assert!(check(T::CareerPathSet, &payload, CountRule::Exactly(4)).is_valid());

        let short_modules = json!([career_path(3)]);
        assert!(check(T::CareerPathSet, &short_modules, CountRule::AtLeast(1)).is_valid());
        let short_modules = json!([career_path(3), career_path(5), career_path(5), career_path(5)]);
        assert!(!check(T::CareerPathSet, &short_modules, CountRule::Exactly(4)).is_valid());
    }

    #[test]
    fn test_career_path_field_checks() {
        let mut bad = career_path(5);
        bad["difficulty"] = json!("expert");
        assert!(!check(T::CareerPathSet, &json!([bad]), CountRule::AtLeast(1)).is_valid());
        let mut bad = career_path(5);
        bad["relevanceScore"] = json!(140);
        assert!(!check(T::CareerPathSet, &json!([bad]), CountRule::AtLeast(1)).is_valid());
    }

    #[test]
    fn test_long_nudge_is_noted_not_rejected() {
        let long = "x".repeat(200);
        let payload = json!([
            {"type": "tip", "text": "Keep going"},
            {"type": "recommendation", "text": long},
            {"type": "challenge", "text": "Score 100%"}
        ]);
        let result = check(T::NudgeSet, &payload, CountRule::Exactly(3));
        assert!(result.is_valid());
        assert_eq!(result.notes.len(), 1);

        let payload = json!([{"type": "joke", "text": "Knock knock"}]);
        assert!(!check(T::NudgeSet, &payload, CountRule::AtLeast(1)).is_valid());
    }

    #[test]
    fn test_learning_path_entries() {
        let payload = json!([{"title": "Module 1: Basics"}, {"title": ""}]);
        assert!(!check(T::LearningPathSkeleton, &payload, CountRule::AtLeast(1)).is_valid());
    }

    #[test]
    fn test_plain_text() {
        assert!(check(T::ChatReply, &json!("Hello"), CountRule::AtLeast(1)).is_valid());
        assert!(!check(T::NarrativeSummary, &json!("  "), CountRule::AtLeast(1)).is_valid());
    }

    #[test]
    fn test_into_result_carries_task() {
        let err = ValidationResult::reject("nope")
            .into_result(GenerationTask::Quiz)
            .unwrap_err();
        assert_eq!(err.to_string(), "quiz payload rejected: nope");
    }
}
