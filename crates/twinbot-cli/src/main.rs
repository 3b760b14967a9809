//! Twinbot CLI — entry point.
//!
//! # Commands
//!
//! - `twinbot chat [-m MESSAGE]` — talk to the twin (single-shot or REPL)
//! - `twinbot serve` — run the HTTP chat server
//! - `twinbot status` — show configuration, knowledge and credential status

mod helpers;
mod repl;
mod server;
mod status;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use twinbot_agent::{default_tools, AgentLoop, KnowledgeBase, PersonaBuilder};
use twinbot_core::config::{load_config, Config};
use twinbot_core::utils::expand_home;
use twinbot_providers::{create_provider, LlmRequestConfig, PushoverNotifier};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Twinbot — a conversational AI twin that speaks for you
#[derive(Parser)]
#[command(name = "twinbot", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.twinbot/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the twin (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Serve the chat over HTTP
    Serve,

    /// Show configuration and credential status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `.env` wins over the inherited environment.
    let dotenv = dotenvy::dotenv_override();

    init_logging(cli.logs);
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded .env");
    }

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Chat { message } => run_chat(&config, message).await,
        Commands::Serve => server::run(&config).await,
        Commands::Status => status::run(&config, cli.config.as_deref()),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(config: &Config, message: Option<String>) -> Result<()> {
    let agent_loop = build_agent_loop(config)?;

    match message {
        Some(msg) => {
            // Single-shot mode
            let reply = agent_loop
                .chat(&msg, &[])
                .await
                .context("chat turn failed")?;
            helpers::print_response(agent_loop.persona().name(), &reply);
        }
        None => {
            // Interactive REPL mode
            repl::run(agent_loop).await?;
        }
    }

    Ok(())
}

/// Build an `AgentLoop` from the loaded configuration.
///
/// Knowledge is loaded once here. A missing API key is fatal.
pub fn build_agent_loop(config: &Config) -> Result<AgentLoop> {
    let agent = &config.agent;

    let provider = create_provider(&config.provider, &agent.model)?;

    let knowledge = KnowledgeBase::load(
        &expand_home(&config.persona.profile_path),
        &expand_home(&config.persona.summary_path),
    );

    let mut persona = PersonaBuilder::new(&config.persona.name, knowledge);
    if let Some(about) = &config.persona.about {
        persona = persona.with_about(about);
    }

    let notifier = Arc::new(PushoverNotifier::new(&config.notifications.pushover));
    if !notifier.is_configured() {
        info!("pushover credentials missing, notifications disabled");
    }

    let agent_loop = AgentLoop::new(Arc::new(provider), persona, default_tools(notifier))
        .with_model(&agent.model)
        .with_max_iterations(agent.max_tool_iterations as usize)
        .with_request_config(LlmRequestConfig {
            max_tokens: agent.max_tokens,
            temperature: agent.temperature,
        });

    Ok(agent_loop)
}

/// Initialize tracing/logging.
///
/// `RUST_LOG` takes precedence over the `--logs` default.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "twinbot=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
