//! OpenAI provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tracing::debug;
use voxnav_config::ModelConfig;
use voxnav_protocols::{LanguageModel, ProviderError};

use crate::api::{ChatMessage, ChatRequest, ChatResponse};
use crate::stream::SseAccumulator;

/// Chat completions client for OpenAI and compatible APIs.
pub struct OpenAIProvider {
    api_key: Option<String>,
    api_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(config: &ModelConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            api_key: config.resolved_api_key(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            stream: config.stream,
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: self.stream,
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else {
            ProviderError::Network(e.to_string())
        }
    }

    async fn send_request(&self, request: &ChatRequest<'_>) -> Result<reqwest::Response, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::AuthenticationFailed("no API key configured".to_string())
        })?;

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError { status, message: text });
        }

        Ok(response)
    }

    async fn read_full(&self, response: reqwest::Response) -> Result<String, ProviderError> {
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        let content = body.into_content().ok_or(ProviderError::EmptyResponse)?;
        let content = content.trim();
        if content.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(content.to_string())
    }

    async fn read_stream(&self, response: reqwest::Response) -> Result<String, ProviderError> {
        let mut bytes = response.bytes_stream();
        let mut acc = SseAccumulator::new();

        while let Some(chunk) = bytes.next().await {
            let chunk = chunk.map_err(|e| ProviderError::StreamError(e.to_string()))?;
            acc.feed(&chunk)?;
            if acc.is_done() {
                break;
            }
        }

        acc.finish()
    }
}

#[async_trait]
impl LanguageModel for OpenAIProvider {
    fn id(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = self.build_request(prompt);
        debug!(model = %self.model, stream = self.stream, "Sending completion request");

        let response = self.send_request(&request).await?;
        let text = if self.stream {
            self.read_stream(response).await?
        } else {
            self.read_full(response).await?
        };

        debug!(chars = text.len(), "Completion received");
        Ok(text)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
