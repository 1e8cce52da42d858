//! Model candidate value object

use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};

/// A (provider, model) pair tried by the router (Value Object)
///
/// Lower `priority` values are tried first. Candidates are static
/// configuration; they never carry runtime state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelCandidate {
    pub provider: ProviderKind,
    pub model: String,
    pub priority: u32,
}

impl ModelCandidate {
    pub fn new(provider: ProviderKind, model: impl Into<String>, priority: u32) -> Self {
        Self {
            provider,
            model: model.into(),
            priority,
        }
    }

    /// Parse a `"provider:model"` entry, e.g. `"groq:llama3-70b-8192"`.
    pub fn parse(entry: &str, priority: u32) -> Result<Self, String> {
        let (provider, model) = entry
            .split_once(':')
            .ok_or_else(|| format!("candidate '{}' must look like 'provider:model'", entry))?;
        let model = model.trim();
        if model.is_empty() {
            return Err(format!("candidate '{}' has an empty model name", entry));
        }
        Ok(Self::new(provider.parse()?, model, priority))
    }

    /// Build an ordered candidate list from `"provider:model"` entries.
    ///
    /// Priority follows list position.
    pub fn parse_list<S: AsRef<str>>(entries: &[S]) -> Result<Vec<Self>, String> {
        entries
            .iter()
            .enumerate()
            .map(|(i, s)| Self::parse(s.as_ref(), i as u32))
            .collect()
    }
}

impl std::fmt::Display for ModelCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.provider, self.model)
    }
}

/// Sort candidates into try order (stable for equal priorities).
pub fn ordered(candidates: &[ModelCandidate]) -> Vec<&ModelCandidate> {
    let mut sorted: Vec<_> = candidates.iter().collect();
    sorted.sort_by_key(|c| c.priority);
    sorted
}
