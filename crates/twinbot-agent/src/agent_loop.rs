//! Agent loop — the LLM ↔ tool-calling conversation turn.
//!
//! One call to [`AgentLoop::chat`] runs a whole turn: build the persona
//! context, call the model, execute any requested tools, feed their results
//! back, and repeat until the model answers in plain text.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use twinbot_core::types::Message;
use twinbot_providers::traits::{LlmProvider, LlmRequestConfig};
use twinbot_providers::Notifier;

use crate::context::PersonaBuilder;
use crate::tools::base::parse_arguments;
use crate::tools::recording::{RecordUnknownQuestionTool, RecordUserDetailsTool};
use crate::tools::registry::ToolRegistry;

/// Default maximum model calls per user message.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Reply used when the model keeps requesting tools past the iteration ceiling.
pub const ITERATION_LIMIT_REPLY: &str =
    "Sorry, I got stuck working on that one. Could you rephrase your question?";

/// The registry every twin ships with: the two recording tools.
pub fn default_tools(notifier: Arc<dyn Notifier>) -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(RecordUserDetailsTool::new(notifier.clone())));
    tools.register(Arc::new(RecordUnknownQuestionTool::new(notifier)));
    tools
}

// ─────────────────────────────────────────────
// AgentLoop
// ─────────────────────────────────────────────

/// Everything a turn needs, fixed at construction and shared read-only.
pub struct AgentLoop {
    /// LLM provider.
    provider: Arc<dyn LlmProvider>,
    /// Model to use (overrides provider default if set).
    model: String,
    /// Max model calls per message.
    max_iterations: usize,
    /// LLM request config (temperature, max_tokens).
    request_config: LlmRequestConfig,
    /// Tool registry.
    tools: ToolRegistry,
    /// Persona + knowledge.
    persona: PersonaBuilder,
}

impl AgentLoop {
    /// Create a new agent loop using the provider's default model.
    pub fn new(provider: Arc<dyn LlmProvider>, persona: PersonaBuilder, tools: ToolRegistry) -> Self {
        let model = provider.default_model().to_string();

        info!(
            model = %model,
            persona = persona.name(),
            tools = tools.len(),
            "agent loop initialized"
        );

        Self {
            provider,
            model,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            request_config: LlmRequestConfig::default(),
            tools,
            persona,
        }
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the iteration ceiling. Zero is bumped to one so a turn always
    /// reaches the model.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Set sampling parameters.
    pub fn with_request_config(mut self, config: LlmRequestConfig) -> Self {
        self.request_config = config;
        self
    }

    /// Answer `message` given the prior `history`.
    ///
    /// Every tool call in a model reply gets exactly one tool-result message,
    /// in call order, before the model is called again.
    ///
    /// # Errors
    /// A failed model call ends the turn and is returned as-is.
    pub async fn chat(&self, message: &str, history: &[Message]) -> Result<String> {
        let mut messages = self.persona.build_messages(history, message);
        let tool_defs = self.tools.get_definitions();
        // An empty `tools` array is rejected by the API; omit it instead.
        let tools = (!tool_defs.is_empty()).then_some(tool_defs.as_slice());

        for iteration in 0..self.max_iterations {
            debug!(iteration = iteration, messages = messages.len(), "LLM call");

            let response = self
                .provider
                .chat(&messages, tools, &self.model, &self.request_config)
                .await?;

            if !response.wants_tools() {
                debug!(
                    iteration = iteration,
                    finish_reason = response.finish_reason.as_deref().unwrap_or("?"),
                    "final answer"
                );
                return Ok(response.content.unwrap_or_default());
            }

            let tool_calls = response.tool_calls;
            PersonaBuilder::add_assistant_tool_calls(&mut messages, response.content, tool_calls.clone());

            for tc in &tool_calls {
                info!(tool = %tc.function.name, iteration = iteration, "tool called");

                let params = parse_arguments(&tc.function.arguments);
                let result = self.tools.execute(&tc.function.name, params).await;
                let result = result.to_string();

                debug!(tool = %tc.function.name, result = %result, "tool result");
                PersonaBuilder::add_tool_result(&mut messages, &tc.id, &result);
            }
        }

        warn!(
            max_iterations = self.max_iterations,
            "tool-call cycle hit the iteration ceiling"
        );
        Ok(ITERATION_LIMIT_REPLY.to_string())
    }

    /// Get a reference to the tool registry.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get the persona.
    pub fn persona(&self) -> &PersonaBuilder {
        &self.persona
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the iteration ceiling.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
