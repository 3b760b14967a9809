//! Config loader — reads `~/.twinbot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.twinbot/config.json` (or an explicit path)
//! 3. Environment variables (override JSON):
//!    - the conventional `OPENAI_API_KEY`, `OPENAI_BASE_URL`,
//!      `PUSHOVER_TOKEN`, `PUSHOVER_USER`
//!    - `TWINBOT_<SECTION>__<FIELD>` for everything else

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the given path (or the default path) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `OPENAI_API_KEY` → `provider.api_key`
/// - `OPENAI_BASE_URL` → `provider.api_base`
/// - `PUSHOVER_TOKEN` → `notifications.pushover.token`
/// - `PUSHOVER_USER` → `notifications.pushover.user`
/// - `TWINBOT_AGENT__MODEL` → `agent.model`
/// - `TWINBOT_AGENT__MAX_TOOL_ITERATIONS` → `agent.max_tool_iterations`
/// - `TWINBOT_PERSONA__NAME` → `persona.name`
/// - `TWINBOT_PERSONA__PROFILE_PATH` → `persona.profile_path`
/// - `TWINBOT_PERSONA__SUMMARY_PATH` → `persona.summary_path`
/// - `TWINBOT_SERVER__HOST` → `server.host`
/// - `TWINBOT_SERVER__PORT` → `server.port`
fn apply_env_overrides(mut config: Config) -> Config {
    // Provider
    if let Some(val) = non_empty_env("OPENAI_API_KEY") {
        config.provider.api_key = val;
    }
    if let Some(val) = non_empty_env("OPENAI_BASE_URL") {
        config.provider.api_base = Some(val);
    }

    // Notifications
    if let Some(val) = non_empty_env("PUSHOVER_TOKEN") {
        config.notifications.pushover.token = val;
    }
    if let Some(val) = non_empty_env("PUSHOVER_USER") {
        config.notifications.pushover.user = val;
    }

    // Agent
    if let Some(val) = non_empty_env("TWINBOT_AGENT__MODEL") {
        config.agent.model = val;
    }
    if let Some(val) = non_empty_env("TWINBOT_AGENT__MAX_TOOL_ITERATIONS") {
        match val.parse::<u32>() {
            Ok(n) => config.agent.max_tool_iterations = n,
            Err(_) => warn!(value = %val, "ignoring invalid TWINBOT_AGENT__MAX_TOOL_ITERATIONS"),
        }
    }

    // Persona
    if let Some(val) = non_empty_env("TWINBOT_PERSONA__NAME") {
        config.persona.name = val;
    }
    if let Some(val) = non_empty_env("TWINBOT_PERSONA__PROFILE_PATH") {
        config.persona.profile_path = val;
    }
    if let Some(val) = non_empty_env("TWINBOT_PERSONA__SUMMARY_PATH") {
        config.persona.summary_path = val;
    }

    // Server
    if let Some(val) = non_empty_env("TWINBOT_SERVER__HOST") {
        config.server.host = val;
    }
    if let Some(val) = non_empty_env("TWINBOT_SERVER__PORT") {
        match val.parse::<u16>() {
            Ok(p) => config.server.port = p,
            Err(_) => warn!(value = %val, "ignoring invalid TWINBOT_SERVER__PORT"),
        }
    }

    config
}

/// Read an env var, treating an empty value as unset.
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
