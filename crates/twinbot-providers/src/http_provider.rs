//! HTTP LLM provider for OpenAI-compatible `/chat/completions` endpoints.
//!
//! Defaults to the OpenAI API; any compatible gateway works by setting
//! `provider.apiBase` (or `OPENAI_BASE_URL`).

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, error};

use twinbot_core::config::schema::ProviderConfig;
use twinbot_core::types::{ChatCompletionRequest, ChatCompletionResponse, LlmResponse, Message, ToolDefinition};

use crate::error::ProviderError;
use crate::traits::{LlmProvider, LlmRequestConfig};

/// API base used when none is configured.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

const DISPLAY_NAME: &str = "OpenAI";

// ─────────────────────────────────────────────
// HttpProvider
// ─────────────────────────────────────────────

/// Talks to an OpenAI-compatible chat completions API via `reqwest`.
pub struct HttpProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Default model for this provider instance.
    default_model: String,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("api_base", &self.api_base)
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl HttpProvider {
    /// Create a new HttpProvider from the provider config.
    pub fn new(config: &ProviderConfig, model: &str) -> anyhow::Result<Self> {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("failed to build HTTP client")?;

        Ok(HttpProvider {
            client,
            api_base,
            api_key: config.api_key.clone(),
            default_model: model.to_string(),
        })
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl LlmProvider for HttpProvider {
    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        model: &str,
        config: &LlmRequestConfig,
    ) -> Result<LlmResponse, ProviderError> {
        debug!(
            provider = DISPLAY_NAME,
            model = %model,
            messages = messages.len(),
            tools = tools.map_or(0, |t| t.len()),
            "Calling LLM"
        );

        let request_body = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            tools: tools.map(|t| t.to_vec()),
            tool_choice: tools.map(|_| "auto".to_string()),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|source| {
                error!(provider = DISPLAY_NAME, error = %source, "HTTP request failed");
                ProviderError::Http {
                    provider: DISPLAY_NAME.into(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                provider = DISPLAY_NAME,
                status = %status,
                body = %body,
                "API error"
            );
            return Err(ProviderError::Api {
                provider: DISPLAY_NAME.into(),
                status,
                body,
            });
        }

        let chat_resp = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|source| {
                error!(provider = DISPLAY_NAME, error = %source, "Failed to parse LLM response");
                ProviderError::Parse {
                    provider: DISPLAY_NAME.into(),
                    source,
                }
            })?;

        let llm_resp = chat_resp
            .into_first_choice()
            .ok_or_else(|| ProviderError::NoChoices {
                provider: DISPLAY_NAME.into(),
            })?;

        debug!(
            provider = DISPLAY_NAME,
            has_content = llm_resp.content.is_some(),
            tool_calls = llm_resp.tool_calls.len(),
            finish_reason = llm_resp.finish_reason.as_deref().unwrap_or("?"),
            "LLM response received"
        );
        Ok(llm_resp)
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }
}

// ─────────────────────────────────────────────
// Builder (convenience)
// ─────────────────────────────────────────────

/// Build an HttpProvider from config, failing when no API key is set.
///
/// A missing model credential is fatal at startup.
pub fn create_provider(config: &ProviderConfig, model: &str) -> anyhow::Result<HttpProvider> {
    if !config.is_configured() {
        anyhow::bail!(
            "No API key configured for model '{}'. Set OPENAI_API_KEY or provider.apiKey in the config file.",
            model
        );
    }

    debug!(
        provider = DISPLAY_NAME,
        model = model,
        api_base = config.api_base.as_deref().unwrap_or("default"),
        "Creating LLM provider"
    );

    HttpProvider::new(config, model)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
