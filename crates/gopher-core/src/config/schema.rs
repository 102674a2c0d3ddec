//! Configuration schema.
//!
//! Hierarchy: `Config` → `BotConfig`, `SlackConfig`, `PlaygroundConfig`,
//! and the ordered `channels` list.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration: loaded from `~/.gopher/config.json` + env vars.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub bot: BotConfig,
    pub slack: SlackConfig,
    pub playground: PlaygroundConfig,
    /// Community channels, in the order they are listed to users.
    pub channels: Vec<ChannelConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            slack: SlackConfig::default(),
            playground: PlaygroundConfig::default(),
            channels: default_channels(),
        }
    }
}

// ─────────────────────────────────────────────
// Bot
// ─────────────────────────────────────────────

/// Bot identity and behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotConfig {
    /// Display name of the bot user.
    pub name: String,
    /// Literal word that addresses the bot in shared channels.
    pub wake_word: String,
    /// Version reported by `version` and the deploy notice.
    pub version: String,
    /// Log every event and never act on it.
    pub dev_mode: bool,
    /// User names that receive the deploy notice.
    pub admins: Vec<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "gopher".to_string(),
            wake_word: "gopher".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            dev_mode: false,
            admins: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────
// Slack
// ─────────────────────────────────────────────

/// Slack credentials and API endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlackConfig {
    /// Bot token (`xoxb-...`): required.
    pub bot_token: String,
    /// App-level token (`xapp-...`): required for Socket Mode.
    pub app_token: String,
    /// Web API base URL.
    pub api_base: String,
    /// HTTP timeout for Web API calls, in seconds.
    pub timeout_secs: u64,
}

impl SlackConfig {
    /// Whether both tokens needed to connect are present.
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.app_token.is_empty()
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            app_token: String::new(),
            api_base: "https://slack.com/api".to_string(),
            timeout_secs: 30,
        }
    }
}

// ─────────────────────────────────────────────
// Playground
// ─────────────────────────────────────────────

/// Go Playground share service.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaygroundConfig {
    /// Endpoint receiving the raw file contents.
    pub share_url: String,
    /// Link posted back to the channel; `{id}` is replaced with the snippet ID.
    pub link_template: String,
    /// Files shorter than this are not forwarded.
    pub min_lines: u32,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            share_url: "https://play.golang.org/share".to_string(),
            link_template: "https://play.golang.org/p/{id}".to_string(),
            min_lines: 6,
            user_agent: "Gophers Slack bot".to_string(),
            timeout_secs: 30,
        }
    }
}

// ─────────────────────────────────────────────
// Channels
// ─────────────────────────────────────────────

/// A community channel the bot can link to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelConfig {
    pub name: String,
    pub description: String,
    /// Listed in the welcome message.
    pub welcome: bool,
    /// Hidden from "recommended channels".
    pub restricted: bool,
}

impl ChannelConfig {
    fn new(name: &str, description: &str, welcome: bool, restricted: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            welcome,
            restricted,
        }
    }
}

/// The Gophers Slack channel list.
pub fn default_channels() -> Vec<ChannelConfig> {
    vec![
        ChannelConfig::new("golang-newbies", "for newbie resources", true, false),
        ChannelConfig::new("reviews", "for code reviews", true, false),
        ChannelConfig::new("gotimefm", "for the awesome live podcast", true, false),
        ChannelConfig::new("remotemeetup", "for remote meetup", true, false),
        ChannelConfig::new("golang-jobs", "for jobs related to Go", true, false),
        ChannelConfig::new("showandtell", "tell the world about the thing you are working on", false, false),
        ChannelConfig::new("performance", "anything and everything performance related", false, false),
        ChannelConfig::new("devops", "for devops related discussions", false, false),
        ChannelConfig::new("security", "for security related discussions", false, false),
        ChannelConfig::new("aws", "if you are interested in AWS", false, false),
        ChannelConfig::new("bbq", "Go controlling your bbq grill? Yes, we have that", false, false),
        ChannelConfig::new("general", "general channel", false, true),
        ChannelConfig::new("golang_cls", "https://twitter.com/golang_cls", false, true),
        ChannelConfig::new("golang-cls", "https://twitter.com/golang_cls", false, true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bot.wake_word, "gopher");
        assert_eq!(config.slack.api_base, "https://slack.com/api");
        assert_eq!(config.playground.min_lines, 6);
        assert!(!config.slack.is_configured());
    }

    #[test]
    fn test_default_channels_flags() {
        let channels = default_channels();
        assert_eq!(channels.iter().filter(|c| c.welcome).count(), 5);
        assert!(channels
            .iter()
            .filter(|c| c.restricted)
            .all(|c| !c.welcome));
    }

    #[test]
    fn test_camel_case_round_trip_keys() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert!(json["slack"].get("botToken").is_some());
        assert!(json["playground"].get("linkTemplate").is_some());
        assert!(json["bot"].get("devMode").is_some());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"bot": {"devMode": true}}"#).unwrap();
        assert!(config.bot.dev_mode);
        assert_eq!(config.bot.name, "gopher");
        assert_eq!(config.channels.len(), default_channels().len());
    }

    #[test]
    fn test_channels_override_replaces_list() {
        let config: Config = serde_json::from_str(
            r#"{"channels": [{"name": "rust", "description": "crabs", "welcome": true}]}"#,
        )
        .unwrap();
        assert_eq!(config.channels.len(), 1);
        assert!(config.channels[0].welcome);
        assert!(!config.channels[0].restricted);
    }
}
