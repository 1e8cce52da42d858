//! Candidate dispatch across provider adapters.
//!
//! [`RoutingGateway`] is the [`LlmGateway`] the application sees. It owns one
//! adapter per provider that has a credential and hands each candidate to
//! the matching one.

use super::{GeminiAdapter, OpenAiCompatibleAdapter, ProviderAdapter};
use async_trait::async_trait;
use coursegen_application::ports::llm_gateway::{GatewayError, LlmGateway};
use coursegen_domain::{ModelCandidate, ProviderConfig, ProviderKind};
use std::sync::Arc;
use tracing::debug;

/// [`LlmGateway`] that dispatches each candidate to its provider's adapter.
pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
}

impl RoutingGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { providers }
    }

    /// Build adapters for every provider that has a credential.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, GatewayError> {
        let mut providers: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

        for kind in [ProviderKind::Groq, ProviderKind::OpenAi] {
            if let Some(adapter) = OpenAiCompatibleAdapter::new(kind, config.get(kind))? {
                providers.push(Arc::new(adapter));
            }
        }
        if let Some(adapter) = GeminiAdapter::new(&config.gemini)? {
            providers.push(Arc::new(adapter));
        }

        debug!(
            "Enabled providers: {:?}",
            providers.iter().map(|p| p.kind()).collect::<Vec<_>>()
        );
        Ok(Self::new(providers))
    }

    pub fn enabled(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    fn resolve_provider(&self, kind: ProviderKind) -> Result<&dyn ProviderAdapter, GatewayError> {
        self.providers
            .iter()
            .find(|p| p.kind() == kind)
            .map(|p| p.as_ref())
            .ok_or(GatewayError::ProviderNotConfigured(kind))
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn complete(
        &self,
        candidate: &ModelCandidate,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        self.resolve_provider(candidate.provider)?
            .complete(&candidate.model, prompt)
            .await
    }
}
