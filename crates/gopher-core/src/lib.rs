//! Gopher Core: shared types, event bus, configuration, and the channel
//! registry used by every other crate.
//!
//! - **bus**: inbound events and the queue connecting the socket listener to the bot loop
//! - **config**: typed schema, JSON loader, env overrides
//! - **registry**: named community channels and their write-once platform IDs
//! - **context**: the immutable `BotContext` produced at startup
//! - **platform**: traits the Slack client implements

pub mod bus;
pub mod config;
pub mod context;
pub mod error;
pub mod platform;
pub mod registry;
pub mod types;
pub mod utils;

pub use context::{BotContext, BotIdentity};
pub use error::PlatformError;
pub use registry::ChannelRegistry;
