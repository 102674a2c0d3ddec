//! `gopher run`: connect to Slack and serve events.
//!
//! Startup sequence:
//! 1. Load config
//! 2. Resolve identity, channels, admins (fatal only if identity fails)
//! 3. Build rule table, dispatcher, executor, bot loop
//! 4. Run: `tokio::select!` of the bot loop + Socket Mode listener
//! 5. Handle Ctrl+C for graceful shutdown

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use gopher_core::bus::EventBus;
use gopher_core::config::load_config;
use gopher_dispatch::{ActionExecutor, Dispatcher, GopherBot, PlaygroundClient, RuleTable};
use gopher_slack::{initialize, SlackWebClient, SocketModeListener};

use crate::{helpers, rules_cmd};

/// Event bus capacity between the listener and the bot loop.
const BUS_CAPACITY: usize = 100;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    helpers::print_banner("run");

    let config = load_config(config_path);
    if !config.slack.is_configured() {
        anyhow::bail!(
            "Slack tokens are not configured; set slack.botToken and slack.appToken \
             (or GOPHER_SLACK__BOT_TOKEN / GOPHER_SLACK__APP_TOKEN)"
        );
    }

    let web = Arc::new(SlackWebClient::new(&config.slack).context("failed to create Slack client")?);

    // Nothing is dispatched until the context exists
    let ctx = initialize(web.as_ref(), web.as_ref(), &config).await?;

    let rules = RuleTable::standard(&config.playground);
    rules_cmd::warn_shadowed(&rules);

    println!("  Bot:       {} ({})", ctx.identity.name, ctx.identity.user_id);
    println!("  Version:   {}", ctx.version);
    println!(
        "  Channels:  {}/{} resolved",
        ctx.channels.resolved_count(),
        ctx.channels.len()
    );
    println!("  Rules:     {}", rules.len());
    if ctx.dev_mode {
        println!("  Dev mode:  on (events are logged, never acted on)");
    }
    println!();
    println!("  Ctrl+C to stop");
    println!();

    let bus = Arc::new(EventBus::new(BUS_CAPACITY));
    let paste = Arc::new(
        PlaygroundClient::new(&config.playground).context("failed to create playground client")?,
    );
    let executor = ActionExecutor::new(web.clone(), paste, config.playground.min_lines);
    let dispatcher = Dispatcher::new(Arc::new(ctx), rules);
    let bot = GopherBot::new(bus.clone(), dispatcher, executor);
    let listener = SocketModeListener::new(&config.slack, bus);

    info!("gopher starting");

    tokio::select! {
        _ = bot.run() => {
            info!("bot loop exited");
        }
        result = listener.run() => {
            if let Err(e) = result {
                error!(error = %e, "Socket Mode listener stopped");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("  Shutting down...");
            info!("received Ctrl+C, shutting down");
            listener.stop().await;
        }
    }

    println!("  Gopher stopped. Goodbye!");
    Ok(())
}
