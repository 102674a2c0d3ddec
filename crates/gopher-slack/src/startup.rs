//! Startup: resolve everything the dispatcher needs before events flow.
//!
//! Only a failed identity lookup is fatal. Without a channel listing the
//! registry stays unresolved and replies fall back to plain `#name` links;
//! without a user listing no deploy notice is sent.

use anyhow::{Context, Result};
use tracing::{info, warn};

use gopher_core::config::Config;
use gopher_core::context::BotContext;
use gopher_core::platform::{ChatPlatform, Directory};
use gopher_core::registry::ChannelRegistry;
use gopher_core::types::{PlatformUser, PostMessage};

/// Build the immutable bot context from the platform directory.
pub async fn initialize(
    directory: &dyn Directory,
    platform: &dyn ChatPlatform,
    config: &Config,
) -> Result<BotContext> {
    let identity = directory
        .identity()
        .await
        .context("failed to resolve bot identity")?;
    info!(user_id = %identity.user_id, name = %identity.name, "resolved bot identity");

    let channels = match directory.list_channels().await {
        Ok(listing) => {
            let registry = ChannelRegistry::resolve(&config.channels, &listing);
            info!(
                listed = listing.len(),
                resolved = registry.resolved_count(),
                known = registry.len(),
                "resolved channel IDs"
            );
            registry
        }
        Err(e) => {
            warn!(error = %e, "channel listing failed, channel links stay unresolved");
            ChannelRegistry::unresolved(&config.channels)
        }
    };

    let admins = if config.bot.admins.is_empty() {
        Vec::new()
    } else {
        match directory.list_users().await {
            Ok(users) => resolve_admins(&config.bot.admins, &users),
            Err(e) => {
                warn!(error = %e, "user listing failed, deploy notice skipped");
                Vec::new()
            }
        }
    };

    let ctx = BotContext::new(identity, config.bot.version.clone())
        .with_wake_word(&config.bot.wake_word)
        .with_channels(channels)
        .with_admins(admins)
        .with_dev_mode(config.bot.dev_mode);

    announce_deploy(platform, &ctx).await;
    Ok(ctx)
}

/// Map admin user names to IDs, skipping bots and unknown names.
fn resolve_admins(names: &[String], users: &[PlatformUser]) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| {
            let found = users
                .iter()
                .find(|u| !u.is_bot && u.name.eq_ignore_ascii_case(name));
            if found.is_none() {
                warn!(admin = %name, "admin not found in user listing");
            }
            found.map(|u| u.id.clone())
        })
        .collect()
}

async fn announce_deploy(platform: &dyn ChatPlatform, ctx: &BotContext) {
    let text = format!("Deployed version: {}", ctx.version);
    for admin in &ctx.admins {
        if let Err(e) = platform.post_message(&PostMessage::new(admin, text.as_str())).await {
            warn!(admin = %admin, error = %e, "failed to send deploy notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gopher_core::config::schema::ChannelConfig;
    use gopher_core::context::BotIdentity;
    use gopher_core::error::PlatformError;
    use gopher_core::types::{FileInfo, PlatformChannel};
    use std::sync::Mutex;

    struct MockDirectory {
        identity_ok: bool,
        channels: Option<Vec<PlatformChannel>>,
        users: Option<Vec<PlatformUser>>,
    }

    impl MockDirectory {
        fn healthy() -> Self {
            Self {
                identity_ok: true,
                channels: Some(vec![
                    PlatformChannel::public("C1", "Reviews"),
                    PlatformChannel::private("G1", "reviews"),
                    PlatformChannel::public("C2", "random"),
                ]),
                users: Some(vec![
                    PlatformUser {
                        id: "U1".into(),
                        name: "dlsniper".into(),
                        is_bot: false,
                    },
                    PlatformUser {
                        id: "UBOT".into(),
                        name: "gopher".into(),
                        is_bot: true,
                    },
                ]),
            }
        }
    }

    #[async_trait]
    impl Directory for MockDirectory {
        async fn identity(&self) -> Result<BotIdentity, PlatformError> {
            if !self.identity_ok {
                return Err(PlatformError::api("auth.test", "invalid_auth"));
            }
            Ok(BotIdentity {
                user_id: "UBOT".into(),
                name: "gopher".into(),
            })
        }

        async fn list_channels(&self) -> Result<Vec<PlatformChannel>, PlatformError> {
            self.channels
                .clone()
                .ok_or_else(|| PlatformError::api("conversations.list", "ratelimited"))
        }

        async fn list_users(&self) -> Result<Vec<PlatformUser>, PlatformError> {
            self.users
                .clone()
                .ok_or_else(|| PlatformError::api("users.list", "ratelimited"))
        }
    }

    #[derive(Default)]
    struct RecordingPlatform {
        posts: Mutex<Vec<PostMessage>>,
    }

    #[async_trait]
    impl ChatPlatform for RecordingPlatform {
        async fn post_message(&self, msg: &PostMessage) -> Result<(), PlatformError> {
            self.posts.lock().unwrap().push(msg.clone());
            Ok(())
        }

        async fn add_reaction(&self, _: &str, _: &str, _: &str) -> Result<(), PlatformError> {
            Ok(())
        }

        async fn file_info(&self, file_id: &str) -> Result<FileInfo, PlatformError> {
            Err(PlatformError::api("files.info", format!("file_not_found: {file_id}")))
        }

        async fn download_file(&self, _: &str) -> Result<Vec<u8>, PlatformError> {
            Ok(Vec::new())
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.bot.version = "3.1.4".into();
        config.bot.admins = vec!["DLSniper".into(), "ghost".into()];
        config.channels = vec![
            ChannelConfig {
                name: "reviews".into(),
                description: "for code reviews".into(),
                welcome: true,
                restricted: false,
            },
            ChannelConfig {
                name: "aws".into(),
                description: "if you are interested in AWS".into(),
                welcome: false,
                restricted: false,
            },
        ];
        config
    }

    #[tokio::test]
    async fn test_initialize_resolves_everything() {
        let platform = RecordingPlatform::default();
        let ctx = initialize(&MockDirectory::healthy(), &platform, &config())
            .await
            .unwrap();

        assert_eq!(ctx.identity.user_id, "UBOT");
        assert_eq!(ctx.version, "3.1.4");
        assert_eq!(ctx.channels.get("reviews").unwrap().id.as_deref(), Some("C1"));
        assert_eq!(ctx.channels.get("aws").unwrap().id, None);
        assert_eq!(ctx.admins, vec!["U1".to_string()]);

        let posts = platform.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].to, "U1");
        assert_eq!(posts[0].text, "Deployed version: 3.1.4");
    }

    #[tokio::test]
    async fn test_identity_failure_is_fatal() {
        let directory = MockDirectory {
            identity_ok: false,
            ..MockDirectory::healthy()
        };
        let err = initialize(&directory, &RecordingPlatform::default(), &config())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("invalid_auth"));
    }

    #[tokio::test]
    async fn test_listing_failures_are_not_fatal() {
        let directory = MockDirectory {
            identity_ok: true,
            channels: None,
            users: None,
        };
        let platform = RecordingPlatform::default();
        let ctx = initialize(&directory, &platform, &config()).await.unwrap();

        assert_eq!(ctx.channels.resolved_count(), 0);
        assert_eq!(ctx.channels.len(), 2);
        assert!(ctx.admins.is_empty());
        assert!(platform.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_admins_skips_user_listing() {
        let directory = MockDirectory {
            users: None,
            ..MockDirectory::healthy()
        };
        let mut config = config();
        config.bot.admins.clear();
        let platform = RecordingPlatform::default();

        let ctx = initialize(&directory, &platform, &config).await.unwrap();
        assert!(ctx.admins.is_empty());
        assert!(platform.posts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_admins_skips_bots() {
        let users = vec![PlatformUser {
            id: "UB".into(),
            name: "gopher".into(),
            is_bot: true,
        }];
        assert!(resolve_admins(&["gopher".into()], &users).is_empty());
    }
}
