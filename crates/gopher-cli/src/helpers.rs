//! Shared CLI helpers: path expansion, banners, action printing.

use std::path::PathBuf;

use colored::Colorize;

use gopher_dispatch::{Action, Audience};

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Print the banner shown at startup.
pub fn print_banner(mode: &str) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}  {}", "Gopher".cyan().bold(), version.dimmed(), mode.dimmed());
    println!();
}

/// Green check or red cross.
pub fn mark(ok: bool) -> String {
    if ok {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn audience_label(audience: Audience) -> &'static str {
    match audience {
        Audience::Channel => "channel",
        Audience::Sender => "dm",
    }
}

/// Render an action the way the console shows it.
pub fn describe_action(action: &Action) -> String {
    match action {
        Action::Post {
            text,
            audience,
            unfurl_links,
            ..
        } => {
            let unfurl = if *unfurl_links { " (unfurled)" } else { "" };
            format!("[post → {}{}]\n{}", audience_label(*audience), unfurl, text)
        }
        Action::PostAttachment {
            text,
            attachment,
            audience,
        } => format!(
            "[post → {} + attachment]\n{}\n---\n{}",
            audience_label(*audience),
            text,
            attachment
        ),
        Action::React { emojis } => {
            let names: Vec<String> = emojis.iter().map(|e| format!(":{e}:")).collect();
            format!("[react] {}", names.join(" "))
        }
        Action::Forward {
            file_id,
            link_template,
        } => format!("[forward {file_id} → {link_template}]"),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
