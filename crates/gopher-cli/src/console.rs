//! `gopher console`: try the rule table against typed messages.
//!
//! Runs the real dispatcher against an offline context: no Slack connection,
//! placeholder bot ID, unresolved channel links. Nothing is executed; the
//! selected action is printed instead.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use gopher_core::config::load_config;
use gopher_core::context::BotContext;
use gopher_core::types::{MessageEvent, NewMember};
use gopher_core::utils::get_data_path;
use gopher_dispatch::{Action, Dispatcher, RuleTable};

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

const CONSOLE_USER: &str = "UCONSOLE";
const CONSOLE_CHANNEL: &str = "CCONSOLE";
const CONSOLE_DM: &str = "DCONSOLE";

/// What a console line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Exit,
    ToggleDirect,
    Welcome(&'a str),
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let lower = line.to_lowercase();
    if EXIT_COMMANDS.contains(&lower.as_str()) {
        return Input::Exit;
    }
    if lower == "/dm" {
        return Input::ToggleDirect;
    }
    if let Some(name) = line.strip_prefix("/welcome ") {
        return Input::Welcome(name.trim());
    }
    Input::Message(line)
}

/// Dispatch a console line as a channel message or a DM.
fn evaluate(dispatcher: &Dispatcher, text: &str, direct: bool) -> Option<(&'static str, Action)> {
    let channel = if direct { CONSOLE_DM } else { CONSOLE_CHANNEL };
    let event = MessageEvent::new(channel, CONSOLE_USER, text);
    dispatcher
        .route(&event)
        .map(|routed| (routed.rule.name, routed.action))
}

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let ctx = BotContext::offline(&config).with_dev_mode(false);
    let wake_word = ctx.wake_word.clone();
    let dispatcher = Dispatcher::new(Arc::new(ctx), RuleTable::standard(&config.playground));

    helpers::print_banner("console");
    println!(
        "{}",
        format!(
            "Messages are sent to a channel; address the bot with \"{wake_word} ...\".\n\
             /dm toggles direct messages, /welcome <name> previews the welcome, exit quits."
        )
        .dimmed()
    );
    println!();

    let mut editor = create_editor()?;
    let mut direct = false;

    loop {
        let prompt = if direct { "dm> " } else { "#channel> " };
        let input = match editor.readline(prompt) {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(&input);

        match parse_input(trimmed) {
            Input::Exit => break,
            Input::ToggleDirect => {
                direct = !direct;
                let mode = if direct { "direct message" } else { "channel" };
                println!("{}", format!("now sending as {mode}").dimmed());
            }
            Input::Welcome(name) => {
                let member = NewMember {
                    id: CONSOLE_USER.to_string(),
                    name: name.to_string(),
                };
                match dispatcher.welcome(&member) {
                    Some(action) => println!("{}\n", helpers::describe_action(&action)),
                    None => println!("{}\n", "(no welcome)".dimmed()),
                }
            }
            Input::Message(text) => {
                debug!(direct, input = text, "evaluating console input");
                match evaluate(&dispatcher, text, direct) {
                    Some((rule, action)) => {
                        println!("{} {}", "rule:".dimmed(), rule.cyan());
                        println!("{}\n", helpers::describe_action(&action));
                    }
                    None => println!("{}\n", "(no action)".dimmed()),
                }
            }
        }
    }

    save_history(&mut editor);
    Ok(())
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded console history from {}", history_path.display());
    }

    Ok(editor)
}

fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

fn history_path() -> std::path::PathBuf {
    get_data_path().join("history").join("console_history")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use gopher_core::config::Config;

    fn dispatcher() -> Dispatcher {
        let config = Config::default();
        Dispatcher::new(
            Arc::new(BotContext::offline(&config)),
            RuleTable::standard(&config.playground),
        )
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse_input("EXIT"), Input::Exit);
        assert_eq!(parse_input(":q"), Input::Exit);
        assert_eq!(parse_input("/dm"), Input::ToggleDirect);
        assert_eq!(parse_input("/welcome ada"), Input::Welcome("ada"));
        assert_eq!(parse_input("gopher help"), Input::Message("gopher help"));
    }

    #[test]
    fn channel_message_needs_wake_word() {
        let d = dispatcher();
        assert!(evaluate(&d, "help", false).is_none());
        assert_eq!(evaluate(&d, "gopher help", false).map(|(r, _)| r), Some("help"));
    }

    #[test]
    fn direct_message_is_addressed() {
        let d = dispatcher();
        assert_eq!(evaluate(&d, "version", true).map(|(r, _)| r), Some("version"));
    }

    #[test]
    fn offline_mention_is_recognized() {
        let d = dispatcher();
        let text = format!("<@{}> stack", gopher_core::context::OFFLINE_BOT_ID);
        assert_eq!(evaluate(&d, &text, false).map(|(r, _)| r), Some("location"));
    }

    #[test]
    fn history_path_under_data_dir() {
        let path = history_path();
        assert!(path.to_string_lossy().contains(".gopher"));
        assert!(path.to_string_lossy().contains("console_history"));
    }
}
