//! Gopher CLI: entry point.
//!
//! # Commands
//!
//! - `gopher run [--logs] [--json]`: connect to Slack and serve events
//! - `gopher console`: try the rule table locally, no Slack connection
//! - `gopher rules`: list the rule table and any shadowed rules
//! - `gopher status`: show configuration status
//! - `gopher onboard`: write a default config file

mod console;
mod gateway;
mod helpers;
mod onboard;
mod rules_cmd;
mod status;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Gopher: community bot for the Gophers Slack
#[derive(Parser)]
#[command(name = "gopher", version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.gopher/config.json)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Slack and start handling events
    Run {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,

        /// Emit logs as JSON lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Type messages and see which action the bot would take
    Console {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Print the rule table in evaluation order
    Rules,

    /// Show configuration status
    Status,

    /// Write a default configuration file
    Onboard,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path: Option<PathBuf> = cli.config.as_deref().map(helpers::expand_tilde);
    let config_path = config_path.as_deref();

    match cli.command {
        Commands::Run { logs, json } => {
            init_logging(logs, json);
            gateway::run(config_path).await
        }
        Commands::Console { logs } => {
            init_logging(logs, false);
            console::run(config_path)
        }
        Commands::Rules => {
            init_logging(false, false);
            rules_cmd::run(config_path)
        }
        Commands::Status => status::run(config_path),
        Commands::Onboard => onboard::run(config_path),
    }
}

/// Initialize tracing/logging. `RUST_LOG` wins over the flags.
fn init_logging(verbose: bool, json: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "gopher=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}
