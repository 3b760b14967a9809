//! Utility helpers — path resolution and string manipulation.

use std::path::PathBuf;

/// Get the Twinbot data directory (e.g. `~/.twinbot/`).
pub fn get_data_path() -> PathBuf {
    home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".twinbot")
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Expand `~` to the home directory in a path string.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate_string("hello world, this is a long string", 15);
        assert_eq!(result, "hello world,...");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate_string("こんにちは世界です", 5), "こん...");
    }

    #[test]
    fn test_expand_home_tilde() {
        let expanded = expand_home("~/me/summary.txt");
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("me/summary.txt"));
    }

    #[test]
    fn test_expand_home_relative_untouched() {
        assert_eq!(expand_home("me/linkedin.pdf"), PathBuf::from("me/linkedin.pdf"));
    }

    #[test]
    fn test_data_path_ends_with_twinbot() {
        assert!(get_data_path().ends_with(".twinbot"));
    }
}
