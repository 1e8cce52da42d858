//! Narrative career summary shape.

use serde::{Deserialize, Serialize};

/// Free-form coaching narrative addressed to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NarrativeSummary(pub String);

impl NarrativeSummary {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
