//! Core types for the Gopher bot: typed views of the Slack payloads the bot
//! cares about.
//!
//! Slack sends loosely-typed JSON; the socket listener converts the fields we
//! use into these structs so the dispatcher never touches `serde_json::Value`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Inbound messages
// ─────────────────────────────────────────────

/// A file attached to a message (Slack `files[0]`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Platform file ID (e.g. `F0123ABC`).
    pub id: String,
    /// Slack file type (`"go"`, `"text"`, `"png"`, ...).
    pub filetype: String,
}

/// A message posted in a channel, group, or DM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEvent {
    /// Channel ID the message was posted in.
    pub channel: String,
    /// Sender user ID. Empty for system messages.
    pub user: String,
    /// Raw message text, exactly as received.
    pub text: String,
    /// Message timestamp (Slack's message ID within a channel).
    pub ts: String,
    /// Set when the message was posted by an integration.
    pub bot_id: Option<String>,
    /// Slack message subtype (`bot_message`, `file_share`, `channel_join`...).
    pub subtype: Option<String>,
    /// Slack channel type (`"im"`, `"channel"`, `"group"`, `"mpim"`).
    pub channel_type: Option<String>,
    /// First attached file, if any.
    pub file: Option<FileRef>,
    /// When the listener received the event.
    pub received_at: DateTime<Utc>,
}

impl MessageEvent {
    /// Create a plain user message with the minimal required fields.
    pub fn new(
        channel: impl Into<String>,
        user: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        MessageEvent {
            channel: channel.into(),
            user: user.into(),
            text: text.into(),
            ts: String::new(),
            bot_id: None,
            subtype: None,
            channel_type: None,
            file: None,
            received_at: Utc::now(),
        }
    }

    /// Set the message timestamp.
    pub fn with_ts(mut self, ts: impl Into<String>) -> Self {
        self.ts = ts.into();
        self
    }

    /// Attach a file reference.
    pub fn with_file(mut self, id: impl Into<String>, filetype: impl Into<String>) -> Self {
        self.file = Some(FileRef {
            id: id.into(),
            filetype: filetype.into(),
        });
        self
    }

    /// Whether this message was posted in a direct-message conversation.
    ///
    /// DM channel IDs always start with `D`.
    pub fn is_direct(&self) -> bool {
        self.channel_type.as_deref() == Some("im") || self.channel.starts_with('D')
    }
}

/// A user who just joined the workspace (`team_join`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    pub id: String,
    pub name: String,
}

// ─────────────────────────────────────────────
// Directory listings
// ─────────────────────────────────────────────

/// Visibility of a listed conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Public,
    Private,
}

/// One conversation as returned by the platform's channel listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformChannel {
    pub id: String,
    pub name: String,
    pub kind: ChannelKind,
}

impl PlatformChannel {
    pub fn public(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ChannelKind::Public,
        }
    }

    pub fn private(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ChannelKind::Private,
        }
    }
}

/// One workspace member as returned by the platform's user listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformUser {
    pub id: String,
    pub name: String,
    pub is_bot: bool,
}

// ─────────────────────────────────────────────
// Outbound requests
// ─────────────────────────────────────────────

/// A `chat.postMessage` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostMessage {
    /// Channel ID or user ID (posting to a user ID opens the bot DM).
    pub to: String,
    pub text: String,
    /// Optional single attachment body.
    pub attachment: Option<String>,
    pub unfurl_links: bool,
    pub link_names: bool,
}

impl PostMessage {
    pub fn new(to: impl Into<String>, text: impl Into<String>) -> Self {
        PostMessage {
            to: to.into(),
            text: text.into(),
            attachment: None,
            unfurl_links: false,
            link_names: false,
        }
    }

    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    pub fn unfurled(mut self) -> Self {
        self.unfurl_links = true;
        self
    }

    pub fn with_link_names(mut self) -> Self {
        self.link_names = true;
        self
    }
}

/// Metadata returned by `files.info`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub id: String,
    /// Number of lines in a text snippet (0 when unknown).
    pub lines: u32,
    /// Private download URL; requires the bot token.
    pub url_private_download: String,
}
