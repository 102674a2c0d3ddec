//! Platform traits: the abstract interface to the chat service.
//!
//! The Slack Web API client implements both traits. The dispatcher crate
//! only sees `Arc<dyn ChatPlatform>`, so tests swap in an in-memory mock.

use async_trait::async_trait;

use crate::context::BotIdentity;
use crate::error::PlatformError;
use crate::types::{FileInfo, PlatformChannel, PlatformUser, PostMessage};

/// Outbound effects the bot can have on the platform.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Post a message to a channel or to a user (DM).
    async fn post_message(&self, msg: &PostMessage) -> Result<(), PlatformError>;

    /// Add an emoji reaction to the message at `ts` in `channel`.
    async fn add_reaction(&self, channel: &str, ts: &str, name: &str) -> Result<(), PlatformError>;

    /// Fetch metadata for an uploaded file.
    async fn file_info(&self, file_id: &str) -> Result<FileInfo, PlatformError>;

    /// Download a private file's contents.
    async fn download_file(&self, url: &str) -> Result<Vec<u8>, PlatformError>;
}

/// Lookups performed once during startup.
#[async_trait]
pub trait Directory: Send + Sync {
    /// The bot's own identity.
    async fn identity(&self) -> Result<BotIdentity, PlatformError>;

    /// All public and private conversations visible to the bot.
    async fn list_channels(&self) -> Result<Vec<PlatformChannel>, PlatformError>;

    /// All workspace members.
    async fn list_users(&self) -> Result<Vec<PlatformUser>, PlatformError>;
}
