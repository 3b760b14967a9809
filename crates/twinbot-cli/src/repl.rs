//! Interactive REPL — a terminal chat with the twin.
//!
//! Uses `rustyline` for readline-style editing with persistent input history.
//! The conversation transcript lives only in memory for the session.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use twinbot_agent::AgentLoop;
use twinbot_core::types::Message;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Run the interactive REPL loop.
pub async fn run(agent: AgentLoop) -> Result<()> {
    let persona = agent.persona().name().to_string();
    helpers::print_banner(&persona);

    let mut editor = create_editor()?;
    let mut history: Vec<Message> = Vec::new();

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => break,
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye! 👋");
            break;
        }

        let _ = editor.add_history_entry(&input);

        debug!(turns = history.len() / 2, "processing input");
        helpers::print_thinking();

        match agent.chat(trimmed, &history).await {
            Ok(reply) => {
                helpers::clear_thinking();
                helpers::print_response(&persona, &reply);
                record_turn(&mut history, trimmed, reply);
            }
            Err(e) => {
                helpers::clear_thinking();
                eprintln!("\n❌ Error: {e:#}\n");
            }
        }
    }

    save_history(&mut editor);

    Ok(())
}

/// Append a completed exchange to the transcript. Failed turns are not recorded.
fn record_turn(history: &mut Vec<Message>, user: &str, reply: String) {
    history.push(Message::user(user));
    history.push(Message::assistant(reply));
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the input history file.
fn history_path() -> std::path::PathBuf {
    twinbot_core::utils::get_data_path().join("history").join("cli_history")
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
