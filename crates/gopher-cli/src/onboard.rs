//! `gopher onboard`: write a default configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use gopher_core::config::{get_config_path, save_config, Config};
use gopher_core::utils::get_data_path;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    println!();
    println!("{}", "Gopher — Setup".cyan().bold());
    println!();

    let path = config_path.map(Path::to_path_buf).unwrap_or_else(get_config_path);
    if write_default_config(&path)? {
        println!("  {} created config at {}", "✓".green(), path.display());
    } else {
        println!("  {} config already exists at {}", "✓".green(), path.display());
    }

    let history_dir = get_data_path().join("history");
    std::fs::create_dir_all(&history_dir)
        .with_context(|| format!("failed to create {}", history_dir.display()))?;

    println!();
    println!(
        "{}",
        "  Add your Slack bot and app tokens, then run `gopher run`.".green()
    );
    println!();

    Ok(())
}

/// Write `Config::default()` to `path` unless a file is already there.
/// Returns whether a file was written.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gopher_core::config::load_config;

    #[test]
    fn writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert!(write_default_config(&path).unwrap());
        let config = load_config(Some(&path));
        assert_eq!(config.bot.wake_word, "gopher");
        assert_eq!(config.channels.len(), Config::default().channels.len());
    }

    #[test]
    fn keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"bot": {"name": "custom"}}"#).unwrap();

        assert!(!write_default_config(&path).unwrap());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"bot": {"name": "custom"}}"#
        );
    }
}
