//! `twinbot serve` — the web chat surface.
//!
//! Stateless HTTP: the client keeps the transcript and sends it back with
//! every message.
//!
//! - `GET  /health` — liveness
//! - `GET  /`       — page title and description for the chat UI
//! - `POST /chat`   — `{message, history}` → `{reply}`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use twinbot_agent::AgentLoop;
use twinbot_core::config::Config;
use twinbot_core::types::Message;

/// Body of the 502 returned when the model call fails.
const MODEL_FAILURE_MESSAGE: &str = "model request failed";

// ─────────────────────────────────────────────
// State & payloads
// ─────────────────────────────────────────────

/// Shared, read-only server state.
pub struct AppState {
    pub agent: AgentLoop,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns, oldest first. Omitted on the first message.
    #[serde(default)]
    pub history: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    version: String,
}

#[derive(Serialize)]
struct PageInfo {
    title: String,
    description: String,
    persona: String,
}

// ─────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn page_info(State(state): State<Arc<AppState>>) -> Json<PageInfo> {
    Json(PageInfo {
        title: state.title.clone(),
        description: state.description.clone(),
        persona: state.agent.persona().name().to_string(),
    })
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<Value>)> {
    match state.agent.chat(&payload.message, &payload.history).await {
        Ok(reply) => Ok(Json(ChatResponse { reply })),
        Err(e) => {
            // Upstream bodies can echo credentials; keep them in the log only.
            error!(error = %format!("{e:#}"), "chat turn failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": MODEL_FAILURE_MESSAGE })),
            ))
        }
    }
}

/// Build the router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(page_info))
        .route("/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

/// Bind and serve until Ctrl-C.
pub async fn run(config: &Config) -> Result<()> {
    let agent = crate::build_agent_loop(config)?;
    let state = Arc::new(AppState {
        agent,
        title: config.persona.title.clone(),
        description: config.persona.description.clone(),
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "chat server listening");
    crate::helpers::print_serving(&addr.to_string());

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .context("server error")?;

    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
