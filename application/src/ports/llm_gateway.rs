//! LLM Gateway port
//!
//! Defines the single completion capability every provider adapter offers.

use async_trait::async_trait;
use coursegen_domain::{ModelCandidate, ProviderKind};
use thiserror::Error;

/// Errors that can occur during one provider call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Provider returned empty content")]
    EmptyContent,

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(ProviderKind),

    #[error("Timeout")]
    Timeout,
}

/// Gateway for LLM completions
///
/// Provider request/response shapes stay behind this port; the router only
/// sees prompt text in and completion text out. Implementations (adapters)
/// live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `prompt` to `candidate` and return the completion text.
    async fn complete(&self, candidate: &ModelCandidate, prompt: &str)
    -> Result<String, GatewayError>;
}
