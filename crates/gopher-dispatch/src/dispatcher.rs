//! Dispatcher: picks at most one action for an inbound message.
//!
//! 1. Drop messages from bots, from ourselves, and system subtypes.
//! 2. Normalize: trim, lowercase.
//! 3. Work out whether the bot was addressed (mention, wake word, or DM)
//!    and strip the wake word.
//! 4. Scan the rule table; the first match wins.
//!
//! No match means no action. That is the common case, not an error.

use std::sync::Arc;

use tracing::{debug, info};

use gopher_core::context::BotContext;
use gopher_core::types::{MessageEvent, NewMember};
use gopher_core::utils::truncate_string;

use crate::action::Action;
use crate::commands;
use crate::rules::{Rule, RuleTable, Scope};

/// Message subtypes generated by Slack or integrations rather than typed by
/// a member. Other subtypes (`file_share`, `thread_broadcast`, `me_message`)
/// still carry user text.
const SYSTEM_SUBTYPES: &[&str] = &[
    "bot_message",
    "bot_add",
    "bot_remove",
    "message_changed",
    "message_deleted",
    "message_replied",
    "channel_join",
    "channel_leave",
    "channel_topic",
    "channel_purpose",
    "channel_name",
    "channel_archive",
    "channel_unarchive",
    "group_join",
    "group_leave",
    "group_topic",
    "group_purpose",
    "group_name",
    "group_archive",
    "group_unarchive",
    "pinned_item",
    "unpinned_item",
    "ekm_access_denied",
    "tombstone",
];

/// A message prepared for rule matching.
#[derive(Clone, Debug)]
pub struct Incoming<'a> {
    pub event: &'a MessageEvent,
    /// Trimmed text, original case.
    pub original: &'a str,
    /// Trimmed, lowercased text.
    pub normalized: &'a str,
    /// Normalized text with the wake word removed; `None` when the bot
    /// was not addressed.
    pub command: Option<&'a str>,
}

/// The rule that fired and the action it produced.
#[derive(Clone, Debug)]
pub struct Routed<'r> {
    pub rule: &'r Rule,
    pub action: Action,
}

/// Matches inbound messages against the rule table.
pub struct Dispatcher {
    context: Arc<BotContext>,
    rules: RuleTable,
}

impl Dispatcher {
    pub fn new(context: Arc<BotContext>, rules: RuleTable) -> Self {
        Self { context, rules }
    }

    pub fn context(&self) -> &BotContext {
        &self.context
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Pick the action for a message, if any.
    pub fn dispatch(&self, event: &MessageEvent) -> Option<Action> {
        self.route(event).map(|routed| routed.action)
    }

    /// Like `dispatch`, but also report which rule fired.
    pub fn route(&self, event: &MessageEvent) -> Option<Routed<'_>> {
        if self.is_ignored(event) {
            return None;
        }

        let original = trim_message(&event.text);
        let normalized = original.to_lowercase();
        let addressed = self.is_addressed(event, &normalized);
        let stripped = addressed.then(|| self.strip_wake_word(&normalized));

        if self.context.dev_mode {
            info!(
                channel = %event.channel,
                user = %event.user,
                text = %normalized,
                addressed,
                command = ?stripped,
                "dev mode: not dispatching"
            );
            return None;
        }

        let msg = Incoming {
            event,
            original,
            normalized: &normalized,
            command: stripped.as_deref(),
        };

        let file = event.file.as_ref();
        let rule = self.rules.iter().find(|rule| match rule.scope {
            Scope::Ambient => rule.matcher.matches(msg.normalized, file),
            Scope::Addressed => msg
                .command
                .is_some_and(|text| rule.matcher.matches(text, file)),
        })?;

        debug!(
            rule = rule.name,
            matcher = %rule.matcher,
            text = %truncate_string(&normalized, 80),
            "rule matched"
        );

        let action = rule.command.resolve(&self.context, &msg, &rule.matcher)?;
        Some(Routed { rule, action })
    }

    /// Greeting for a new workspace member; suppressed in dev mode.
    pub fn welcome(&self, member: &NewMember) -> Option<Action> {
        if self.context.dev_mode {
            info!(user = %member.id, "dev mode: not welcoming new member");
            return None;
        }
        Some(commands::welcome(&self.context, member))
    }

    /// Bot, self, and system messages never dispatch.
    fn is_ignored(&self, event: &MessageEvent) -> bool {
        event.bot_id.as_deref().is_some_and(|id| !id.is_empty())
            || event.user.is_empty()
            || event.user == self.context.identity.user_id
            || event
                .subtype
                .as_deref()
                .is_some_and(|subtype| SYSTEM_SUBTYPES.contains(&subtype))
    }

    /// Whether the message is meant for the bot.
    fn is_addressed(&self, event: &MessageEvent, normalized: &str) -> bool {
        let wake = &self.context.wake_word;
        normalized.starts_with(&self.context.mention())
            || normalized.starts_with(&format!("{wake} "))
            || normalized.starts_with(&format!("{wake}: "))
            || event.is_direct()
    }

    /// Remove a leading mention or wake word, then surrounding ` :\n`.
    fn strip_wake_word(&self, normalized: &str) -> String {
        let wake = self.context.wake_word.as_str();
        let rest = if let Some(rest) = normalized.strip_prefix(&self.context.mention()) {
            rest
        } else {
            match normalized.strip_prefix(wake) {
                Some(rest) if rest.is_empty() || rest.starts_with([' ', ':']) => rest,
                _ => normalized,
            }
        };
        rest.trim_matches([' ', ':', '\n']).to_string()
    }
}

fn trim_message(text: &str) -> &str {
    text.trim_matches([' ', '\n', '\r'])
}
