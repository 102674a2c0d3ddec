//! Utility helpers: data path resolution and log-friendly string truncation.

use std::path::PathBuf;

/// Get the Gopher data directory (e.g. `~/.gopher/`).
pub fn get_data_path() -> PathBuf {
    home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".gopher")
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
    fn test_truncate_exact_length() {
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate_string("hello world, this is a long string", 15);
        assert_eq!(result, "hello world,...");
    }

    #[test]
    fn test_truncate_table_flip() {
        let result = truncate_string("(╯°□°）╯︵ ┻━┻ again", 8);
        assert_eq!(result, "(╯°□°...");
    }

    #[test]
    fn test_data_path_ends_with_gopher() {
        assert!(get_data_path().ends_with(".gopher"));
    }
}
