//! Action executor: turns an `Action` into platform calls.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use gopher_core::platform::ChatPlatform;
use gopher_core::types::PostMessage;

use crate::action::{Action, Audience, Origin};
use crate::playground::{snippet_link, PasteService};
use crate::resources;

/// Performs actions against the chat platform.
pub struct ActionExecutor {
    platform: Arc<dyn ChatPlatform>,
    paste: Arc<dyn PasteService>,
    /// Uploads shorter than this are not worth a playground link.
    min_lines: u32,
}

impl ActionExecutor {
    pub fn new(platform: Arc<dyn ChatPlatform>, paste: Arc<dyn PasteService>, min_lines: u32) -> Self {
        Self {
            platform,
            paste,
            min_lines,
        }
    }

    /// Carry out a single action for the message (or member) at `origin`.
    pub async fn execute(&self, action: &Action, origin: &Origin) -> Result<()> {
        match action {
            Action::Post {
                text,
                audience,
                unfurl_links,
                link_names,
            } => {
                let mut msg = PostMessage::new(origin.destination(*audience), text.as_str());
                if *unfurl_links {
                    msg = msg.unfurled();
                }
                if *link_names {
                    msg = msg.with_link_names();
                }
                self.platform.post_message(&msg).await?;
            }
            Action::PostAttachment {
                text,
                attachment,
                audience,
            } => {
                let msg = PostMessage::new(origin.destination(*audience), text.as_str())
                    .with_attachment(attachment.as_str());
                self.platform.post_message(&msg).await?;
            }
            Action::React { emojis } => {
                for emoji in emojis {
                    self.platform
                        .add_reaction(&origin.channel, &origin.ts, emoji)
                        .await
                        .with_context(|| format!("adding :{emoji}:"))?;
                }
            }
            Action::Forward {
                file_id,
                link_template,
            } => self.forward(file_id, link_template, origin).await?,
        }
        Ok(())
    }

    async fn forward(&self, file_id: &str, link_template: &str, origin: &Origin) -> Result<()> {
        let info = self.platform.file_info(file_id).await?;
        if info.lines < self.min_lines {
            debug!(file = %file_id, lines = info.lines, "upload too short for playground");
            return Ok(());
        }

        let content = self
            .platform
            .download_file(&info.url_private_download)
            .await?;
        let id = self
            .paste
            .share(content)
            .await
            .context("sharing upload with playground")?;
        let link = snippet_link(link_template, &id);
        info!(file = %file_id, link = %link, "shared upload with playground");

        let notice = PostMessage::new(
            origin.destination(Audience::Channel),
            format!("The above code in playground: <{link}>"),
        );
        self.platform.post_message(&notice).await?;

        let hint = PostMessage::new(origin.destination(Audience::Sender), resources::PLAYGROUND_HINT);
        self.platform.post_message(&hint).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use gopher_core::error::PlatformError;
    use gopher_core::types::{FileInfo, MessageEvent};
    use std::sync::Mutex;

    use crate::playground::PlaygroundError;

    /// Records every platform call.
    #[derive(Default)]
    pub(crate) struct MockPlatform {
        pub posts: Mutex<Vec<PostMessage>>,
        pub reactions: Mutex<Vec<(String, String, String)>>,
        pub downloads: Mutex<Vec<String>>,
        pub file_lines: u32,
        pub fail_reactions: bool,
    }

    impl MockPlatform {
        pub fn with_file_lines(lines: u32) -> Self {
            Self {
                file_lines: lines,
                ..Default::default()
            }
        }

        pub fn posts(&self) -> Vec<PostMessage> {
            self.posts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatPlatform for MockPlatform {
        async fn post_message(&self, msg: &PostMessage) -> Result<(), PlatformError> {
            self.posts.lock().unwrap().push(msg.clone());
            Ok(())
        }

        async fn add_reaction(&self, channel: &str, ts: &str, name: &str) -> Result<(), PlatformError> {
            if self.fail_reactions {
                return Err(PlatformError::api("reactions.add", "already_reacted"));
            }
            self.reactions
                .lock()
                .unwrap()
                .push((channel.into(), ts.into(), name.into()));
            Ok(())
        }

        async fn file_info(&self, file_id: &str) -> Result<FileInfo, PlatformError> {
            Ok(FileInfo {
                id: file_id.into(),
                lines: self.file_lines,
                url_private_download: format!("https://files.example/{file_id}"),
            })
        }

        async fn download_file(&self, url: &str) -> Result<Vec<u8>, PlatformError> {
            self.downloads.lock().unwrap().push(url.into());
            Ok(b"package main\n\nfunc main() {}\n".to_vec())
        }
    }

    /// Paste service returning a fixed id, or failing.
    pub(crate) struct MockPaste {
        pub id: Option<&'static str>,
        pub shared: Mutex<Vec<Vec<u8>>>,
    }

    impl MockPaste {
        pub fn returning(id: &'static str) -> Self {
            Self {
                id: Some(id),
                shared: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                id: None,
                shared: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PasteService for MockPaste {
        async fn share(&self, content: Vec<u8>) -> Result<String, PlaygroundError> {
            self.shared.lock().unwrap().push(content);
            self.id.map(String::from).ok_or(PlaygroundError::EmptyId)
        }
    }

    fn origin() -> Origin {
        Origin::from(&MessageEvent::new("C1", "U1", "hi").with_ts("111.222"))
    }

    fn executor(platform: Arc<MockPlatform>, paste: Arc<MockPaste>) -> ActionExecutor {
        ActionExecutor::new(platform, paste, 6)
    }

    #[tokio::test]
    async fn test_post_to_channel_and_sender() {
        let platform = Arc::new(MockPlatform::default());
        let exec = executor(platform.clone(), Arc::new(MockPaste::returning("x")));

        exec.execute(&Action::post("hi all", Audience::Channel), &origin())
            .await
            .unwrap();
        exec.execute(&Action::post_unfurled("just you", Audience::Sender), &origin())
            .await
            .unwrap();

        let posts = platform.posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].to, "C1");
        assert!(!posts[0].unfurl_links);
        assert_eq!(posts[1].to, "U1");
        assert!(posts[1].unfurl_links);
    }

    #[tokio::test]
    async fn test_attachment_and_link_names() {
        let platform = Arc::new(MockPlatform::default());
        let exec = executor(platform.clone(), Arc::new(MockPaste::returning("x")));

        exec.execute(&Action::attachment("intro", "body", Audience::Sender), &origin())
            .await
            .unwrap();
        let welcome = Action::Post {
            text: "welcome".into(),
            audience: Audience::Sender,
            unfurl_links: false,
            link_names: true,
        };
        exec.execute(&welcome, &Origin::direct("U7")).await.unwrap();

        let posts = platform.posts();
        assert_eq!(posts[0].attachment.as_deref(), Some("body"));
        assert_eq!(posts[1].to, "U7");
        assert!(posts[1].link_names);
    }

    #[tokio::test]
    async fn test_react_adds_each_emoji() {
        let platform = Arc::new(MockPlatform::default());
        let exec = executor(platform.clone(), Arc::new(MockPaste::returning("x")));

        exec.execute(&Action::react(&["beer", "beers"]), &origin())
            .await
            .unwrap();

        let reactions = platform.reactions.lock().unwrap().clone();
        assert_eq!(
            reactions,
            vec![
                ("C1".into(), "111.222".into(), "beer".into()),
                ("C1".into(), "111.222".into(), "beers".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_react_failure_is_reported() {
        let platform = Arc::new(MockPlatform {
            fail_reactions: true,
            ..Default::default()
        });
        let exec = executor(platform, Arc::new(MockPaste::returning("x")));

        let err = exec
            .execute(&Action::react(&["gopher"]), &origin())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("already_reacted"));
    }

    fn forward() -> Action {
        Action::Forward {
            file_id: "F1".into(),
            link_template: "https://play.golang.org/p/{id}".into(),
        }
    }

    #[tokio::test]
    async fn test_forward_posts_link_then_hint() {
        let platform = Arc::new(MockPlatform::with_file_lines(12));
        let paste = Arc::new(MockPaste::returning("Zz9"));
        let exec = executor(platform.clone(), paste.clone());

        exec.execute(&forward(), &origin()).await.unwrap();

        assert_eq!(
            *platform.downloads.lock().unwrap(),
            vec!["https://files.example/F1".to_string()]
        );
        assert_eq!(paste.shared.lock().unwrap().len(), 1);

        let posts = platform.posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].to, "C1");
        assert_eq!(
            posts[0].text,
            "The above code in playground: <https://play.golang.org/p/Zz9>"
        );
        assert_eq!(posts[1].to, "U1");
        assert_eq!(posts[1].text, resources::PLAYGROUND_HINT);
    }

    #[tokio::test]
    async fn test_forward_skips_short_files() {
        let platform = Arc::new(MockPlatform::with_file_lines(5));
        let paste = Arc::new(MockPaste::returning("Zz9"));
        let exec = executor(platform.clone(), paste.clone());

        exec.execute(&forward(), &origin()).await.unwrap();

        assert!(platform.downloads.lock().unwrap().is_empty());
        assert!(paste.shared.lock().unwrap().is_empty());
        assert!(platform.posts().is_empty());
    }

    #[tokio::test]
    async fn test_forward_share_failure_posts_nothing() {
        let platform = Arc::new(MockPlatform::with_file_lines(30));
        let exec = executor(platform.clone(), Arc::new(MockPaste::failing()));

        let err = exec.execute(&forward(), &origin()).await.unwrap_err();
        assert!(err.to_string().contains("playground"));
        assert!(platform.posts().is_empty());
    }
}
