//! Quiz shape shared by topic-based and content-based quizzes.

use serde::{Deserialize, Serialize};

/// Points awarded for a question when the model omits them.
pub const DEFAULT_POINTS: u32 = 10;

/// Every question offers exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(default)]
    pub topic: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Single,
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: Vec<String>,
    pub explanation: String,
    #[serde(default = "default_points")]
    pub point: u32,
    #[serde(default)]
    pub question_type: QuestionType,
}

fn default_points() -> u32 {
    DEFAULT_POINTS
}

impl QuizQuestion {
    /// Templated question with generic options and the first option correct.
    pub fn placeholder(question: String, explanation: String) -> Self {
        let options: Vec<String> = ["Option A", "Option B", "Option C", "Option D"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self {
            question,
            correct_answer: vec![options[0].clone()],
            options,
            explanation,
            point: DEFAULT_POINTS,
            question_type: QuestionType::Single,
        }
    }
}
