//! Generation parameters: router, retry and timeout control.
//!
//! [`GenerationConfig`] holds the per-task candidate lists and the retry
//! policy used by [`GenerationService`](crate::use_cases::generate::GenerationService).
//! It is built once at process start and never mutated afterwards.

use coursegen_domain::{GenerationTask, ModelCandidate, ProviderKind};
use std::collections::BTreeMap;
use std::time::Duration;

/// GROQ models, most capable first.
pub const GROQ_MODELS: [&str; 4] = [
    "llama3-70b-8192",
    "llama3-8b-8192",
    "mixtral-8x7b-32768",
    "gemma-7b-it",
];

/// Bounded retry policy for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Wait between two attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Router, retry and timeout parameters for every task.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Ordered candidates per task.
    pub candidates: BTreeMap<GenerationTask, Vec<ModelCandidate>>,
    /// Policy applied to tasks without an override.
    pub retry: RetryPolicy,
    /// Per-task attempt counts overriding `retry.max_attempts`.
    pub attempts: BTreeMap<GenerationTask, u32>,
    /// Per-attempt timeout for career path generation.
    pub career_timeout: Option<Duration>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let candidates = GenerationTask::ALL
            .iter()
            .map(|&task| (task, default_candidates(task)))
            .collect();
        Self {
            candidates,
            retry: RetryPolicy::default(),
            attempts: BTreeMap::new(),
            career_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl GenerationConfig {
    pub fn candidates_for(&self, task: GenerationTask) -> &[ModelCandidate] {
        self.candidates.get(&task).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn retry_for(&self, task: GenerationTask) -> RetryPolicy {
        match self.attempts.get(&task) {
            Some(&max_attempts) => RetryPolicy {
                max_attempts,
                ..self.retry
            },
            None => self.retry,
        }
    }

    /// Timeout raced against each router pass, if any.
    pub fn timeout_for(&self, task: GenerationTask) -> Option<Duration> {
        match task {
            GenerationTask::CareerPathSet => self.career_timeout,
            _ => None,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_candidates(mut self, task: GenerationTask, candidates: Vec<ModelCandidate>) -> Self {
        self.candidates.insert(task, candidates);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.retry.max_attempts = max;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry.delay = delay;
        self
    }

    pub fn with_task_attempts(mut self, task: GenerationTask, max: u32) -> Self {
        self.attempts.insert(task, max);
        self
    }

    pub fn with_career_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.career_timeout = timeout;
        self
    }
}

fn groq(models: &[&str]) -> impl Iterator<Item = (ProviderKind, String)> {
    models
        .iter()
        .map(|m| (ProviderKind::Groq, (*m).to_string()))
}

fn gemini(model: &str) -> (ProviderKind, String) {
    (ProviderKind::Gemini, model.to_string())
}

/// Built-in candidate order for a task.
///
/// Long-form module content walks the whole GROQ family before switching
/// provider; chat starts with the fastest models.
pub fn default_candidates(task: GenerationTask) -> Vec<ModelCandidate> {
    let pairs: Vec<(ProviderKind, String)> = match task {
        GenerationTask::ModuleContent => groq(&GROQ_MODELS)
            .chain([gemini("gemini-1.5-pro"), gemini("gemini-1.5-flash")])
            .collect(),
        GenerationTask::Quiz | GenerationTask::QuizFromContent | GenerationTask::FlashcardSet => {
            std::iter::once(gemini("gemini-1.5-flash"))
                .chain(groq(&GROQ_MODELS[..2]))
                .collect()
        }
        GenerationTask::ChatReply => groq(&["llama3-8b-8192"])
            .chain([gemini("gemini-1.5-flash"), gemini("gemini-1.5-pro")])
            .collect(),
        GenerationTask::LearningPathSkeleton => std::iter::once(gemini("gemini-1.5-flash"))
            .chain(groq(&GROQ_MODELS[..1]))
            .collect(),
        GenerationTask::CareerPathSet | GenerationTask::NarrativeSummary => {
            std::iter::once(gemini("gemini-2.0-flash"))
                .chain(groq(&GROQ_MODELS[..1]))
                .collect()
        }
        GenerationTask::NudgeSet => groq(&GROQ_MODELS)
            .chain([gemini("gemini-1.5-flash")])
            .collect(),
    };

    pairs
        .into_iter()
        .enumerate()
        .map(|(i, (provider, model))| ModelCandidate::new(provider, model, i as u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = GenerationConfig::default();
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.delay, Duration::from_millis(1000));
        assert_eq!(config.career_timeout, Some(Duration::from_secs(30)));
        for task in GenerationTask::ALL {
            assert!(!config.candidates_for(task).is_empty(), "{}", task);
        }
    }

    #[test]
    fn test_builder() {
        let only = vec![ModelCandidate::new(ProviderKind::OpenAi, "gpt-4o-mini", 0)];
        let config = GenerationConfig::default()
            .with_candidates(GenerationTask::Quiz, only.clone())
            .with_max_attempts(5)
            .with_retry_delay(Duration::from_millis(10))
            .with_task_attempts(GenerationTask::NudgeSet, 1)
            .with_career_timeout(None);

        assert_eq!(config.candidates_for(GenerationTask::Quiz), only.as_slice());
        assert_eq!(config.retry_for(GenerationTask::Quiz).max_attempts, 5);
        assert_eq!(config.retry_for(GenerationTask::NudgeSet).max_attempts, 1);
        assert_eq!(
            config.retry_for(GenerationTask::NudgeSet).delay,
            Duration::from_millis(10)
        );
        assert!(config.timeout_for(GenerationTask::CareerPathSet).is_none());
    }

    #[test]
    fn test_module_content_tries_groq_family_before_gemini() {
        let list = default_candidates(GenerationTask::ModuleContent);
        let providers: Vec<_> = list.iter().map(|c| c.provider).collect();
        assert_eq!(&providers[..4], &[ProviderKind::Groq; 4]);
        assert_eq!(providers[4], ProviderKind::Gemini);
        assert!(list.windows(2).all(|w| w[0].priority < w[1].priority));
    }

    #[test]
    fn test_chat_starts_with_fast_model() {
        let list = default_candidates(GenerationTask::ChatReply);
        assert_eq!(list[0].model, "llama3-8b-8192");
    }

    #[test]
    fn test_timeout_only_for_career_paths() {
        let config = GenerationConfig::default();
        assert!(config.timeout_for(GenerationTask::Quiz).is_none());
        assert_eq!(
            config.timeout_for(GenerationTask::CareerPathSet),
            Some(Duration::from_secs(30))
        );
    }
}
