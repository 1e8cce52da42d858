//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain/application
//! types, reporting problems as [`ConfigIssue`]s.

mod generation;
mod providers;

pub use generation::FileGenerationConfig;
pub use providers::{FileHttpProviderConfig, FileProvidersConfig};

use coursegen_application::config::GenerationConfig;
use coursegen_domain::{ConfigIssue, ConfigIssueCode, ProviderConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving generation events; disabled when unset.
    pub event_log: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider credentials and endpoints
    pub providers: FileProvidersConfig,
    /// Candidate lists, retries and timeouts
    pub generation: FileGenerationConfig,
    /// Structured event log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Provider settings with keys read from the process environment.
    pub fn provider_config(&self) -> ProviderConfig {
        self.providers.resolve(|name| std::env::var(name).ok())
    }

    pub fn generation_config(&self) -> (GenerationConfig, Vec<ConfigIssue>) {
        self.generation.to_generation_config()
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Task names, candidate specs and attempt counts in `[generation]`
    /// 2. Providers used by some candidate but lacking a credential
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.validate_with(&self.provider_config())
    }

    fn validate_with(&self, providers: &ProviderConfig) -> Vec<ConfigIssue> {
        let (generation, mut issues) = self.generation_config();

        let used: BTreeSet<ProviderKind> = generation
            .candidates
            .values()
            .flatten()
            .map(|c| c.provider)
            .collect();
        let used_count = used.len();
        let missing: Vec<ProviderKind> = used
            .into_iter()
            .filter(|&kind| !providers.get(kind).is_enabled())
            .collect();

        if !missing.is_empty() && missing.len() == used_count {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingApiKey {
                    provider: "all".to_string(),
                },
                "no provider has an API key; every request will use fallback content",
            ));
        } else {
            for kind in missing {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::MissingApiKey {
                        provider: kind.to_string(),
                    },
                    format!(
                        "providers.{}: no API key (set {}); its candidates will be skipped",
                        kind,
                        FileHttpProviderConfig::default_api_key_env(kind)
                    ),
                ));
            }
        }

        issues
    }
}
