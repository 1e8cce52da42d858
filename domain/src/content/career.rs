//! Career path set shape.

use crate::core::string::normalized_key;
use serde::{Deserialize, Serialize};

/// A generated set always holds exactly this many paths.
pub const CAREER_PATHS: usize = 4;

/// Every path holds exactly this many modules.
pub const MODULES_PER_PATH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    pub path_name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_time_to_complete: String,
    pub relevance_score: u32,
    pub modules: Vec<CareerModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerModule {
    pub title: String,
    pub description: String,
    pub estimated_hours: u32,
    pub key_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareerPathSet(pub Vec<CareerPath>);

impl CareerPathSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rename every path whose name is the learner's goal itself.
    ///
    /// Names are compared case-insensitively with whitespace collapsed.
    pub fn exclude_goal(&mut self, goal: &str) {
        let goal_key = normalized_key(goal);
        for path in &mut self.0 {
            if normalized_key(&path.path_name) == goal_key {
                path.path_name = format!("{} Career Accelerator", goal.trim());
            }
        }
    }
}
