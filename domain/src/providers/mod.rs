//! Provider identifiers and provider-neutral connection settings.
//!
//! The infrastructure layer resolves file configuration into these types;
//! adapters read them without knowing where the values came from.

use serde::{Deserialize, Serialize};

/// LLM vendors the router can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// GROQ (OpenAI-compatible chat completions)
    Groq,
    /// Google Gemini `generateContent`
    Gemini,
    /// OpenAI or any OpenAI-compatible endpoint
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Top-level provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// GROQ API settings.
    pub groq: HttpProviderConfig,
    /// Gemini API settings.
    pub gemini: HttpProviderConfig,
    /// OpenAI API settings.
    pub openai: HttpProviderConfig,
}

impl ProviderConfig {
    pub fn get(&self, kind: ProviderKind) -> &HttpProviderConfig {
        match kind {
            ProviderKind::Groq => &self.groq,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::OpenAi => &self.openai,
        }
    }
}

/// Settings shared by every HTTPS completion provider.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Resolved bearer credential; `None` disables the provider.
    pub api_key: Option<String>,
    /// Base URL of the completion API.
    pub base_url: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request transport timeout in seconds.
    pub timeout_secs: u64,
}

impl HttpProviderConfig {
    pub const DEFAULT_MAX_TOKENS: u32 = 4096;
    pub const DEFAULT_TEMPERATURE: f32 = 0.3;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Defaults for `kind` with no credential.
    pub fn for_kind(kind: ProviderKind) -> Self {
        let base_url = match kind {
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
        };
        Self {
            api_key: None,
            base_url: base_url.to_string(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            temperature: Self::DEFAULT_TEMPERATURE,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            groq: HttpProviderConfig::for_kind(ProviderKind::Groq),
            gemini: HttpProviderConfig::for_kind(ProviderKind::Gemini),
            openai: HttpProviderConfig::for_kind(ProviderKind::OpenAi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_roundtrip() {
        for kind in [ProviderKind::Groq, ProviderKind::Gemini, ProviderKind::OpenAi] {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_defaults_disabled_without_key() {
        let config = ProviderConfig::default();
        assert!(!config.get(ProviderKind::Groq).is_enabled());
        assert_eq!(config.groq.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.gemini.max_tokens, 4096);
    }

    #[test]
    fn test_provider_kind_aliases() {
        assert_eq!("Google".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert!("bedrock".parse::<ProviderKind>().is_err());
    }
}
