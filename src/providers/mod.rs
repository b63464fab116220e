mod anthropic;
mod factory;
mod ollama;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;

use crate::error::FlowError;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Submit a fully rendered prompt and return the model's raw text
    /// completion. One call here is one request to the hosted model.
    async fn complete(&self, prompt: &str) -> Result<String, FlowError>;
}
