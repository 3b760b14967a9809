//! LLM provider trait — the seam between the conversation loop and the model.
//!
//! `HttpProvider` in `http_provider.rs` covers any OpenAI-compatible API; tests
//! plug in scripted providers through the same trait.

use async_trait::async_trait;
use twinbot_core::types::{LlmResponse, Message, ToolDefinition};

use crate::error::ProviderError;

/// Configuration passed to each LLM call.
///
/// Unset fields are left out of the request so the endpoint's own defaults apply.
#[derive(Clone, Debug, Default)]
pub struct LlmRequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: Option<f64>,
}

/// Trait that all LLM providers must implement.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a chat completion request.
    ///
    /// # Arguments
    /// * `messages` — Conversation history in OpenAI format.
    /// * `tools`    — Optional list of tool definitions the LLM can call.
    /// * `model`    — Model identifier (e.g. `"gpt-4o-mini"`).
    /// * `config`   — Temperature, max_tokens.
    ///
    /// # Errors
    /// Transport, HTTP status, and decoding failures are returned as
    /// [`ProviderError`]. Nothing is retried.
    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        model: &str,
        config: &LlmRequestConfig,
    ) -> Result<LlmResponse, ProviderError>;

    /// The default model for this provider instance.
    fn default_model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
