//! Provider configuration from TOML (`[providers]` section)

use coursegen_domain::{HttpProviderConfig, ProviderConfig, ProviderKind};
use serde::{Deserialize, Serialize};

/// One HTTPS completion provider. Unset fields take per-provider defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpProviderConfig {
    /// Environment variable holding the API key (default: `GROQ_API_KEY`,
    /// `GEMINI_API_KEY` or `OPENAI_API_KEY`).
    pub api_key_env: Option<String>,
    /// Direct API key; prefer the env var.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl FileHttpProviderConfig {
    pub fn default_api_key_env(kind: ProviderKind) -> &'static str {
        match kind {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Resolve into provider settings, reading the key through `env`.
    pub fn resolve<F>(&self, kind: ProviderKind, env: F) -> HttpProviderConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = HttpProviderConfig::for_kind(kind);
        let env_name = self
            .api_key_env
            .as_deref()
            .unwrap_or(Self::default_api_key_env(kind));
        let api_key = self
            .api_key
            .clone()
            .or_else(|| env(env_name))
            .filter(|k| !k.trim().is_empty());

        HttpProviderConfig {
            api_key,
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub groq: FileHttpProviderConfig,
    pub gemini: FileHttpProviderConfig,
    pub openai: FileHttpProviderConfig,
}

impl FileProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &FileHttpProviderConfig {
        match kind {
            ProviderKind::Groq => &self.groq,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::OpenAi => &self.openai,
        }
    }

    pub fn resolve<F>(&self, env: F) -> ProviderConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        ProviderConfig {
            groq: self.groq.resolve(ProviderKind::Groq, &env),
            gemini: self.gemini.resolve(ProviderKind::Gemini, &env),
            openai: self.openai.resolve(ProviderKind::OpenAi, &env),
        }
    }
}
