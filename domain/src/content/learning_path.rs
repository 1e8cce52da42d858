//! Learning path skeleton shape.

use serde::{Deserialize, Serialize};

/// Number of modules in a plain skeleton.
pub const SKELETON_MODULES: usize = 5;

/// Largest outline accepted for a detailed path.
pub const MAX_DETAILED_MODULES: usize = 7;

/// One step of a learning path.
///
/// Plain skeletons only carry `Module N: Title` titles; detailed outlines
/// also describe each module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathModule {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearningPath(pub Vec<PathModule>);

impl LearningPath {
    pub fn titles(&self) -> Vec<&str> {
        self.0.iter().map(|m| m.title.as_str()).collect()
    }
}
