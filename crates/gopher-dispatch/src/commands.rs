//! Commands: what a matched rule does, resolved into a concrete `Action`.
//!
//! Most commands are canned replies. The rest read the message (godoc paths,
//! xkcd numbers, library search terms, the uploaded file) or the bot context
//! (version, channel list).

use tracing::debug;

use gopher_core::context::BotContext;
use gopher_core::types::NewMember;

use crate::action::{Action, Audience};
use crate::dispatcher::Incoming;
use crate::library;
use crate::resources;
use crate::rules::Matcher;

/// The reply a rule produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Fixed text.
    Say {
        text: &'static str,
        audience: Audience,
    },
    /// Fixed intro plus a fixed attachment.
    Attach {
        intro: &'static str,
        body: &'static str,
        audience: Audience,
    },
    /// Emoji reactions on the triggering message.
    React(&'static [&'static str]),
    /// Link to the godoc page for the path following the rule's prefix.
    Godoc { import_prefix: &'static str },
    /// Share an uploaded file with the Go Playground.
    Playground { link_template: String },
    /// Comic link, unfurled.
    Comic(&'static str),
    /// `xkcd:<n>` for any number.
    XkcdNumber,
    LibrarySearch,
    RecommendedChannels,
    FlipCoin,
    Version,
}

impl Command {
    /// Turn the command into an action for this message.
    ///
    /// Returns `None` when the message does not carry what the command needs
    /// (a non-numeric comic, an empty search term, a missing file).
    pub fn resolve(&self, ctx: &BotContext, msg: &Incoming<'_>, matcher: &Matcher) -> Option<Action> {
        match self {
            Command::Say { text, audience } => Some(Action::post(*text, *audience)),
            Command::Attach {
                intro,
                body,
                audience,
            } => Some(Action::attachment(*intro, *body, *audience)),
            Command::React(emojis) => Some(Action::react(emojis)),
            Command::Godoc { import_prefix } => godoc(msg.original, matcher, import_prefix),
            Command::Playground { link_template } => {
                let file = msg.event.file.as_ref()?;
                Some(Action::Forward {
                    file_id: file.id.clone(),
                    link_template: link_template.clone(),
                })
            }
            Command::Comic(link) => Some(Action::post_unfurled(*link, Audience::Channel)),
            Command::XkcdNumber => xkcd_number(msg.command.unwrap_or(msg.normalized)),
            Command::LibrarySearch => {
                let term = library::search_term(msg.original)?;
                Some(Action::post(library::search_reply(&term), Audience::Channel))
            }
            Command::RecommendedChannels => Some(recommended_channels(ctx)),
            Command::FlipCoin => {
                let side = if rand::random::<bool>() { "heads" } else { "tails" };
                Some(Action::post(side, Audience::Channel))
            }
            Command::Version => Some(Action::post(
                format!("My version is: {}", ctx.version),
                Audience::Sender,
            )),
        }
    }
}

/// `d/net/http` → `<https://godoc.org/net/http>`; the path keeps its case.
fn godoc(original: &str, matcher: &Matcher, import_prefix: &str) -> Option<Action> {
    let skip = matcher.pattern()?.len();
    let rest = original.get(skip..)?;
    let path = rest.split(' ').next().unwrap_or_default();
    if path.is_empty() {
        return None;
    }
    Some(Action::post(
        format!("<{}{}{}>", resources::GODOC_BASE, import_prefix, path),
        Audience::Channel,
    ))
}

fn xkcd_number(text: &str) -> Option<Action> {
    let raw = text.strip_prefix("xkcd:")?.trim();
    match raw.parse::<u32>() {
        Ok(num) => Some(Action::post_unfurled(
            format!("https://xkcd.com/{num}/"),
            Audience::Channel,
        )),
        Err(e) => {
            debug!(input = %raw, error = %e, "ignoring non-numeric xkcd request");
            None
        }
    }
}

fn recommended_channels(ctx: &BotContext) -> Action {
    let body: String = ctx
        .channels
        .recommended()
        .map(|c| format!("- {} -> {}\n", c.link(), c.description))
        .collect();
    Action::attachment(resources::RECOMMENDED_CHANNELS_INTRO, body, Audience::Sender)
}

/// Direct message greeting a new workspace member.
pub fn welcome(ctx: &BotContext, member: &NewMember) -> Action {
    let mut text = format!("Hello {},\n\n\n{}", member.name, resources::WELCOME_HEADER);
    for channel in ctx.channels.welcome() {
        text.push_str(&format!("{} -> {}\n", channel.link(), channel.description));
    }
    text.push_str(resources::WELCOME_FOOTER);

    Action::Post {
        text,
        audience: Audience::Sender,
        unfurl_links: false,
        link_names: true,
    }
}
