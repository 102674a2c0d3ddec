//! Config loader: reads `~/.gopher/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.gopher/config.json`
//! 3. Environment variables `GOPHER_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the given path (or the default one) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `GOPHER_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `GOPHER_BOT__NAME`, `GOPHER_BOT__WAKE_WORD`, `GOPHER_BOT__VERSION`
/// - `GOPHER_BOT__DEV_MODE` (`true`/`1`)
/// - `GOPHER_BOT__ADMINS` (comma-separated user names)
/// - `GOPHER_SLACK__BOT_TOKEN`, `GOPHER_SLACK__APP_TOKEN`, `GOPHER_SLACK__API_BASE`
/// - `GOPHER_PLAYGROUND__SHARE_URL`, `GOPHER_PLAYGROUND__MIN_LINES`
fn apply_env_overrides(mut config: Config) -> Config {
    // Bot
    if let Ok(val) = std::env::var("GOPHER_BOT__NAME") {
        config.bot.name = val;
    }
    if let Ok(val) = std::env::var("GOPHER_BOT__WAKE_WORD") {
        config.bot.wake_word = val;
    }
    if let Ok(val) = std::env::var("GOPHER_BOT__VERSION") {
        config.bot.version = val;
    }
    if let Ok(val) = std::env::var("GOPHER_BOT__DEV_MODE") {
        config.bot.dev_mode = val == "true" || val == "1";
    }
    if let Ok(val) = std::env::var("GOPHER_BOT__ADMINS") {
        config.bot.admins = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    // Slack
    if let Ok(val) = std::env::var("GOPHER_SLACK__BOT_TOKEN") {
        config.slack.bot_token = val;
    }
    if let Ok(val) = std::env::var("GOPHER_SLACK__APP_TOKEN") {
        config.slack.app_token = val;
    }
    if let Ok(val) = std::env::var("GOPHER_SLACK__API_BASE") {
        config.slack.api_base = val;
    }

    // Playground
    if let Ok(val) = std::env::var("GOPHER_PLAYGROUND__SHARE_URL") {
        config.playground.share_url = val;
    }
    if let Ok(val) = std::env::var("GOPHER_PLAYGROUND__MIN_LINES") {
        if let Ok(n) = val.parse::<u32>() {
            config.playground.min_lines = n;
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
