//! Language model collaborator.

use async_trait::async_trait;

use crate::error::ProviderError;

/// Turns a prompt into the model's raw response text.
///
/// Streaming implementations buffer until the response is complete, so callers
/// always receive one logical text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Send a single prompt and return the full response text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
