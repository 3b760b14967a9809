//! `twinbot status` — show configuration, knowledge files and credentials.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use twinbot_core::config::{get_config_path, Config};
use twinbot_core::utils::expand_home;

use crate::helpers::check_mark;

/// Run the status command.
pub fn run(config: &Config, config_override: Option<&Path>) -> Result<()> {
    let config_path = config_override
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    println!();
    println!("{}", "Twinbot Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {}",
        "Config:".bold(),
        check_mark(
            config_path.exists(),
            &config_path.display().to_string(),
            &format!("{} (not found, using defaults)", config_path.display()),
        )
    );
    println!("  {:<18} {}", "Persona:".bold(), config.persona.name);

    // Knowledge
    for (label, path) in [
        ("Profile:", &config.persona.profile_path),
        ("Summary:", &config.persona.summary_path),
    ] {
        let resolved = expand_home(path);
        println!(
            "  {:<18} {}",
            label.bold(),
            check_mark(
                resolved.exists(),
                &resolved.display().to_string(),
                &format!("{} (not found)", resolved.display()),
            )
        );
    }

    // Model
    println!("  {:<18} {}", "Model:".bold(), config.agent.model);
    println!(
        "  {:<18} {}",
        "Parameters:".bold(),
        format!(
            "max_tool_iterations: {} | temp: {} | max_tokens: {}",
            config.agent.max_tool_iterations,
            config.agent.temperature.map_or("default".to_string(), |t| t.to_string()),
            config.agent.max_tokens.map_or("default".to_string(), |t| t.to_string()),
        )
        .dimmed(),
    );

    // Credentials
    println!();
    println!(
        "  {:<18} {}",
        "OpenAI API:".bold(),
        check_mark(config.provider.is_configured(), "(key set)", "not configured")
    );
    if let Some(base) = &config.provider.api_base {
        println!("  {:<18} {}", "API base:".bold(), base);
    }
    println!(
        "  {:<18} {}",
        "Pushover:".bold(),
        check_mark(
            config.notifications.pushover.is_configured(),
            "(token + user set)",
            "not configured, notifications disabled",
        )
    );

    // Server
    println!();
    println!(
        "  {:<18} http://{}:{}",
        "Server:".bold(),
        config.server.host,
        config.server.port
    );
    println!();

    Ok(())
}
