//! `gopher status`: show configuration status.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use gopher_core::config::{get_config_path, load_config};

use crate::helpers::mark;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let path = config_path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

    println!();
    println!("{}", "Gopher Status".cyan().bold());
    println!();

    let config_exists = path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        path.display(),
        if config_exists {
            mark(true)
        } else {
            "(not found, using defaults)".red().to_string()
        }
    );

    // Bot
    println!();
    println!("  {}", "Bot:".bold());
    println!("    {:<18} {}", "Name", config.bot.name);
    println!("    {:<18} {}", "Wake word", config.bot.wake_word);
    println!("    {:<18} {}", "Version", config.bot.version);
    println!(
        "    {:<18} {}",
        "Dev mode",
        if config.bot.dev_mode { "on".yellow().to_string() } else { "off".dimmed().to_string() }
    );
    let admins = if config.bot.admins.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        config.bot.admins.join(", ")
    };
    println!("    {:<18} {}", "Admins", admins);

    // Slack
    println!();
    println!("  {}", "Slack:".bold());
    println!("    {:<18} {}", "Bot token", mark(!config.slack.bot_token.is_empty()));
    println!("    {:<18} {}", "App token", mark(!config.slack.app_token.is_empty()));
    println!("    {:<18} {}", "API base", config.slack.api_base);

    // Playground
    println!();
    println!("  {}", "Playground:".bold());
    println!("    {:<18} {}", "Share URL", config.playground.share_url);
    println!("    {:<18} {}", "Min lines", config.playground.min_lines);

    // Channels
    let welcome = config.channels.iter().filter(|c| c.welcome).count();
    let restricted = config.channels.iter().filter(|c| c.restricted).count();
    println!();
    println!(
        "  {:<18} {} known, {} in welcome, {} restricted",
        "Channels:".bold(),
        config.channels.len(),
        welcome,
        restricted
    );

    println!();
    if !config.slack.is_configured() {
        println!(
            "  {}",
            "Set slack.botToken and slack.appToken to run the bot.".yellow()
        );
        println!();
    }

    Ok(())
}
