//! Provider adapters.
//!
//! Each adapter speaks one vendor's completion API and reduces it to the
//! text-in/text-out [`ProviderAdapter`] capability. [`RoutingGateway`]
//! dispatches a candidate to the adapter for its provider.

pub mod gemini;
pub mod openai_compatible;
pub mod routing;

pub use gemini::GeminiAdapter;
pub use openai_compatible::OpenAiCompatibleAdapter;
pub use routing::RoutingGateway;

use async_trait::async_trait;
use coursegen_application::ports::llm_gateway::GatewayError;
use coursegen_domain::{HttpProviderConfig, ProviderKind};
use std::time::Duration;

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Single completion of `prompt` with `model`.
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, GatewayError>;
}

fn build_client(config: &HttpProviderConfig) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| GatewayError::Network(e.to_string()))
}

/// Map a transport failure; the URL is dropped so it never reaches logs.
fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(e.without_url().to_string())
    }
}

/// Map a non-2xx response to an error, keeping a short body excerpt.
async fn status_error(response: reqwest::Response) -> GatewayError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message: String = body.trim().chars().take(200).collect();
    GatewayError::Http { status, message }
}
