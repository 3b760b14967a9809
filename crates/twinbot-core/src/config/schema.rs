//! Configuration schema.
//!
//! Hierarchy: `Config` → `PersonaConfig`, `AgentConfig`, `ProviderConfig`,
//! `NotificationsConfig`, `ServerConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.twinbot/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub persona: PersonaConfig,
    pub agent: AgentConfig,
    pub provider: ProviderConfig,
    pub notifications: NotificationsConfig,
    pub server: ServerConfig,
}

// ─────────────────────────────────────────────
// Persona
// ─────────────────────────────────────────────

/// Who the twin is and where its knowledge lives.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonaConfig {
    /// Full name of the person being represented.
    pub name: String,
    /// One or two sentences on expertise and tone, appended to the persona text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Profile document (PDF or plain text), relative to the working directory.
    pub profile_path: String,
    /// Free-text summary, relative to the working directory.
    pub summary_path: String,
    /// Chat UI title.
    pub title: String,
    /// Chat UI description line.
    pub description: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "Bharat Puri".to_string(),
            about: Some(
                "a DevOps Lead and Cloud Architect with deep expertise in AWS, Azure, GCP, \
                 and Python automation"
                    .to_string(),
            ),
            profile_path: "me/linkedin.pdf".to_string(),
            summary_path: "me/summary.txt".to_string(),
            title: "Bharat Puri – DevOps & AI Twin".to_string(),
            description: "Talk to Bharat Puri's AI twin — your DevOps, Cloud, and AI automation guide."
                .to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Agent
// ─────────────────────────────────────────────

/// Conversation loop settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    /// Chat model identifier.
    pub model: String,
    /// Maximum tokens per response. Omitted from requests when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature. Omitted from requests when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum model calls per user message before giving up on tool cycles.
    pub max_tool_iterations: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: None,
            temperature: None,
            max_tool_iterations: 20,
        }
    }
}

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

/// OpenAI-compatible chat endpoint credentials.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for Bearer authentication.
    pub api_key: String,
    /// Custom API base URL (defaults to `https://api.openai.com/v1`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl ProviderConfig {
    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Notifications
// ─────────────────────────────────────────────

/// Operator notification settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationsConfig {
    pub pushover: PushoverConfig,
}

/// Pushover credentials. Empty token or user disables notifications.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushoverConfig {
    pub token: String,
    pub user: String,
    pub api_base: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl PushoverConfig {
    /// Whether both secrets are present.
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.user.is_empty()
    }
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            user: String::new(),
            api_base: "https://api.pushover.net".to_string(),
            timeout_secs: 10,
        }
    }
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP chat server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7860,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
