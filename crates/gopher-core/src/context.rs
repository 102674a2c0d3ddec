//! Bot context: everything resolved once at startup.
//!
//! A `BotContext` is built by the startup initializer (or offline, for the
//! console) and then shared read-only as `Arc<BotContext>`. Nothing in it
//! changes while events are being dispatched.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::registry::ChannelRegistry;

/// Placeholder user ID used when running without a platform connection.
pub const OFFLINE_BOT_ID: &str = "UGOPHER";

/// The bot's own identity on the platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    pub user_id: String,
    pub name: String,
}

/// Immutable runtime context shared with the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotContext {
    pub identity: BotIdentity,
    /// Deployed version, reported by the `version` command.
    pub version: String,
    /// Literal word that addresses the bot in shared channels.
    pub wake_word: String,
    pub channels: ChannelRegistry,
    /// User IDs notified on deploy.
    pub admins: Vec<String>,
    /// Log events instead of acting on them.
    pub dev_mode: bool,
}

impl BotContext {
    /// Create a context with an empty channel registry.
    pub fn new(identity: BotIdentity, version: impl Into<String>) -> Self {
        BotContext {
            identity,
            version: version.into(),
            wake_word: "gopher".to_string(),
            channels: ChannelRegistry::default(),
            admins: Vec::new(),
            dev_mode: false,
        }
    }

    /// Build a context from config alone, with a placeholder identity and
    /// unresolved channel IDs.
    pub fn offline(config: &Config) -> Self {
        let identity = BotIdentity {
            user_id: OFFLINE_BOT_ID.to_string(),
            name: config.bot.name.clone(),
        };
        BotContext::new(identity, config.bot.version.clone())
            .with_wake_word(&config.bot.wake_word)
            .with_channels(ChannelRegistry::unresolved(&config.channels))
            .with_dev_mode(config.bot.dev_mode)
    }

    pub fn with_wake_word(mut self, wake_word: &str) -> Self {
        self.wake_word = wake_word.trim().to_lowercase();
        self
    }

    pub fn with_channels(mut self, channels: ChannelRegistry) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_admins(mut self, admins: Vec<String>) -> Self {
        self.admins = admins;
        self
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// The bot's mention token, lowercased to match normalized text.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.identity.user_id.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> BotIdentity {
        BotIdentity {
            user_id: "UBOT42".into(),
            name: "gopher".into(),
        }
    }

    #[test]
    fn test_mention_is_lowercase() {
        let ctx = BotContext::new(identity(), "1.0.0");
        assert_eq!(ctx.mention(), "<@ubot42>");
    }

    #[test]
    fn test_wake_word_normalized() {
        let ctx = BotContext::new(identity(), "1.0.0").with_wake_word("  Gopher ");
        assert_eq!(ctx.wake_word, "gopher");
    }

    #[test]
    fn test_offline_from_config() {
        let config = Config::default();
        let ctx = BotContext::offline(&config);
        assert_eq!(ctx.identity.user_id, OFFLINE_BOT_ID);
        assert_eq!(ctx.channels.len(), config.channels.len());
        assert_eq!(ctx.channels.resolved_count(), 0);
        assert!(!ctx.dev_mode);
    }
}
