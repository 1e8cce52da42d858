//! OpenAI-compatible chat completions adapter (GROQ, OpenAI).

use super::{ProviderAdapter, build_client, status_error, transport_error};
use async_trait::async_trait;
use coursegen_application::ports::llm_gateway::GatewayError;
use coursegen_domain::{HttpProviderConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

const TOP_P: f32 = 0.95;

pub struct OpenAiCompatibleAdapter {
    kind: ProviderKind,
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompatibleAdapter {
    /// Build an adapter; `None` when the provider has no credential.
    pub fn new(
        kind: ProviderKind,
        config: &HttpProviderConfig,
    ) -> Result<Option<Self>, GatewayError> {
        let Some(api_key) = config.api_key.clone().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };
        Ok(Some(Self {
            kind,
            client: build_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }))
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatibleAdapter {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: TOP_P,
        };
        debug!("POST {} ({})", url, model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedBody(e.without_url().to_string()))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(GatewayError::EmptyContent);
        }
        Ok(text)
    }
}
