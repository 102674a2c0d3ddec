//! Go Playground share client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::debug;

use gopher_core::config::schema::PlaygroundConfig;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

#[derive(Debug, thiserror::Error)]
pub enum PlaygroundError {
    #[error("failed to build playground client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("playground request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("playground returned {0}")]
    Status(StatusCode),
    #[error("playground returned an empty snippet id")]
    EmptyId,
}

/// Somewhere to publish a snippet and get back its id.
#[async_trait]
pub trait PasteService: Send + Sync {
    async fn share(&self, content: Vec<u8>) -> Result<String, PlaygroundError>;
}

/// Shares code with `POST <share_url>`; the response body is the snippet id.
pub struct PlaygroundClient {
    client: Client,
    share_url: String,
}

impl std::fmt::Debug for PlaygroundClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaygroundClient")
            .field("share_url", &self.share_url)
            .finish()
    }
}

impl PlaygroundClient {
    pub fn new(config: &PlaygroundConfig) -> Result<Self, PlaygroundError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(PlaygroundError::Client)?;
        Ok(Self {
            client,
            share_url: config.share_url.clone(),
        })
    }
}

#[async_trait]
impl PasteService for PlaygroundClient {
    async fn share(&self, content: Vec<u8>) -> Result<String, PlaygroundError> {
        debug!(bytes = content.len(), url = %self.share_url, "sharing snippet");

        let resp = self
            .client
            .post(&self.share_url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(content)
            .send()
            .await
            .map_err(PlaygroundError::Request)?;

        if resp.status() != StatusCode::OK {
            return Err(PlaygroundError::Status(resp.status()));
        }

        let body = resp.text().await.map_err(PlaygroundError::Request)?;
        let id = body.trim();
        if id.is_empty() {
            return Err(PlaygroundError::EmptyId);
        }
        Ok(id.to_string())
    }
}

/// Substitute the snippet id into a link template containing `{id}`.
pub fn snippet_link(template: &str, id: &str) -> String {
    template.replace("{id}", id)
}
