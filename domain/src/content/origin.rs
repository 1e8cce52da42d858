//! Origin tag carried by every generation result.

use serde::{Deserialize, Serialize};

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Produced by a model and accepted by the validator.
    Generated,
    /// Synthesized locally because generation could not be trusted.
    Fallback,
}

/// A task-specific result tagged with its [`Origin`].
///
/// The `content` schema is identical for both origins; callers may only
/// branch on `origin` for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult<T> {
    pub origin: Origin,
    pub content: T,
}

impl<T> GenerationResult<T> {
    pub fn generated(content: T) -> Self {
        Self {
            origin: Origin::Generated,
            content,
        }
    }

    pub fn fallback(content: T) -> Self {
        Self {
            origin: Origin::Fallback,
            content,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Fallback
    }

    pub fn into_content(self) -> T {
        self.content
    }
}
