//! Shared CLI helpers — response printing and banners.

use colored::Colorize;

/// Print a twin reply to stdout, labelled with the persona's name.
pub fn print_response(persona: &str, reply: &str) {
    println!();
    println!("{}", persona.cyan().bold());
    if reply.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{reply}");
    }
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner(persona: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!(
        "{}  v{}",
        format!("Twinbot · {persona}").cyan().bold(),
        version.dimmed()
    );
    println!(
        "{}",
        "Type a message, or \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print the address the chat server is listening on.
pub fn print_serving(addr: &str) {
    println!();
    println!("{}  http://{}", "Twinbot serving".cyan().bold(), addr);
    println!("{}", "POST /chat with {\"message\", \"history\"}. Ctrl-C to stop.".dimmed());
    println!();
}

/// Print a "thinking" placeholder.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

/// `✓ detail` when `ok`, a dimmed `· missing` otherwise.
pub fn check_mark(ok: bool, detail: &str, missing: &str) -> String {
    if ok {
        format!("{} {}", "✓".green(), detail)
    } else {
        format!("{}", format!("· {missing}").dimmed())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
