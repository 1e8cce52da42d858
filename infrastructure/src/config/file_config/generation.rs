//! Generation configuration from TOML (`[generation]` section)

use coursegen_application::config::{GenerationConfig, RetryPolicy};
use coursegen_domain::{ConfigIssue, ConfigIssueCode, GenerationTask, ModelCandidate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Attempts per task, including the first (default: 3).
    pub max_attempts: u32,
    /// Delay between attempts in milliseconds (default: 1000).
    pub retry_delay_ms: u64,
    /// Per-attempt timeout for career paths; 0 disables it (default: 30).
    pub career_timeout_secs: u64,
    /// Task name → ordered `"provider:model"` list replacing the default.
    pub candidates: BTreeMap<String, Vec<String>>,
    /// Task name → attempt count overriding `max_attempts`.
    pub attempts: BTreeMap<String, u32>,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 1000,
            career_timeout_secs: 30,
            candidates: BTreeMap::new(),
            attempts: BTreeMap::new(),
        }
    }
}

fn parse_task(name: &str, issues: &mut Vec<ConfigIssue>) -> Option<GenerationTask> {
    match name.parse::<GenerationTask>() {
        Ok(task) => Some(task),
        Err(_) => {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownTask {
                    name: name.to_string(),
                },
                format!("generation: unknown task '{}', entry ignored", name),
            ));
            None
        }
    }
}

impl FileGenerationConfig {
    /// Convert to [`GenerationConfig`], collecting every issue found.
    ///
    /// Invalid entries are skipped so the task keeps its default list.
    pub fn to_generation_config(&self) -> (GenerationConfig, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        if self.max_attempts == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroAttempts,
                "generation.max_attempts must be at least 1",
            ));
        }

        let career_timeout =
            (self.career_timeout_secs > 0).then(|| Duration::from_secs(self.career_timeout_secs));
        let mut config = GenerationConfig::default()
            .with_retry(RetryPolicy {
                max_attempts: self.max_attempts,
                delay: Duration::from_millis(self.retry_delay_ms),
            })
            .with_career_timeout(career_timeout);

        for (name, specs) in &self.candidates {
            let Some(task) = parse_task(name, &mut issues) else {
                continue;
            };
            if specs.is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyCandidateList { task: name.clone() },
                    format!("generation.candidates.{}: list is empty", name),
                ));
                continue;
            }
            match ModelCandidate::parse_list(specs) {
                Ok(candidates) => config = config.with_candidates(task, candidates),
                Err(reason) => {
                    let value = specs
                        .iter()
                        .find(|s| ModelCandidate::parse(s, 0).is_err())
                        .cloned()
                        .unwrap_or_default();
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::InvalidCandidate {
                            task: name.clone(),
                            value,
                        },
                        format!("generation.candidates.{}: {}", name, reason),
                    ));
                }
            }
        }

        for (name, &attempts) in &self.attempts {
            let Some(task) = parse_task(name, &mut issues) else {
                continue;
            };
            if attempts == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroAttempts,
                    format!("generation.attempts.{} must be at least 1", name),
                ));
                continue;
            }
            config = config.with_task_attempts(task, attempts);
        }

        (config, issues)
    }
}
