//! Slack Web API client.
//!
//! Every call is a form-encoded `POST {api_base}/{method}` with the bot token
//! as bearer auth. Slack answers `200 OK` with `{"ok": false, "error": ...}`
//! on failure, so the `ok` flag is checked on every response.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use gopher_core::config::schema::SlackConfig;
use gopher_core::context::BotIdentity;
use gopher_core::error::PlatformError;
use gopher_core::platform::{ChatPlatform, Directory};
use gopher_core::types::{FileInfo, PlatformChannel, PlatformUser, PostMessage};

/// Page size for cursor-paginated list methods.
const PAGE_LIMIT: &str = "200";

/// Slack Web API client implementing both platform traits.
pub struct SlackWebClient {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
}

impl std::fmt::Debug for SlackWebClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackWebClient")
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ConversationEntry {
    id: String,
    name: String,
    #[serde(default)]
    is_private: bool,
}

#[derive(Debug, Deserialize)]
struct MemberEntry {
    id: String,
    name: String,
    #[serde(default)]
    is_bot: bool,
}

impl SlackWebClient {
    pub fn new(config: &SlackConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_base, method)
    }

    /// Call a Web API method and return the body of a successful response.
    async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<Value, PlatformError> {
        debug!(method, "calling Slack Web API");
        let resp = self
            .http
            .post(self.method_url(method))
            .bearer_auth(&self.bot_token)
            .form(params)
            .send()
            .await
            .map_err(|e| PlatformError::transport(method, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PlatformError::api(method, format!("HTTP {status}")));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| PlatformError::decode(method, e))?;
        if body["ok"].as_bool() != Some(true) {
            let err = body["error"].as_str().unwrap_or("unknown");
            return Err(PlatformError::api(method, err));
        }
        Ok(body)
    }

    /// Collect every page of a cursor-paginated list method.
    async fn paginate<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        field: &str,
        extra: &[(&str, String)],
    ) -> Result<Vec<T>, PlatformError> {
        let mut items = Vec::new();
        let mut cursor = String::new();
        loop {
            let mut params = extra.to_vec();
            params.push(("limit", PAGE_LIMIT.to_string()));
            if !cursor.is_empty() {
                params.push(("cursor", cursor.clone()));
            }

            let mut body = self.call(method, &params).await?;
            let page = body
                .get_mut(field)
                .map(Value::take)
                .ok_or_else(|| PlatformError::missing(method, field))?;
            let page: Vec<T> =
                serde_json::from_value(page).map_err(|e| PlatformError::decode(method, e))?;
            items.extend(page);

            cursor = body["response_metadata"]["next_cursor"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            if cursor.is_empty() {
                return Ok(items);
            }
        }
    }
}

fn required_str<'a>(body: &'a Value, method: &str, field: &str) -> Result<&'a str, PlatformError> {
    body[field]
        .as_str()
        .ok_or_else(|| PlatformError::missing(method, field))
}

#[async_trait]
impl ChatPlatform for SlackWebClient {
    async fn post_message(&self, msg: &PostMessage) -> Result<(), PlatformError> {
        let mut params = vec![
            ("channel", msg.to.clone()),
            ("text", msg.text.clone()),
            ("as_user", "true".to_string()),
            ("unfurl_links", msg.unfurl_links.to_string()),
            ("link_names", msg.link_names.to_string()),
        ];
        if let Some(attachment) = &msg.attachment {
            let attachments = json!([{ "text": attachment }]);
            params.push(("attachments", attachments.to_string()));
        }
        self.call("chat.postMessage", &params).await?;
        Ok(())
    }

    async fn add_reaction(&self, channel: &str, ts: &str, name: &str) -> Result<(), PlatformError> {
        let params = [
            ("channel", channel.to_string()),
            ("timestamp", ts.to_string()),
            ("name", name.to_string()),
        ];
        self.call("reactions.add", &params).await?;
        Ok(())
    }

    async fn file_info(&self, file_id: &str) -> Result<FileInfo, PlatformError> {
        const METHOD: &str = "files.info";
        let body = self.call(METHOD, &[("file", file_id.to_string())]).await?;
        let file = body
            .get("file")
            .ok_or_else(|| PlatformError::missing(METHOD, "file"))?;
        Ok(FileInfo {
            id: required_str(file, METHOD, "id")?.to_string(),
            lines: file["lines"].as_u64().unwrap_or(0) as u32,
            url_private_download: required_str(file, METHOD, "url_private_download")?.to_string(),
        })
    }

    async fn download_file(&self, url: &str) -> Result<Vec<u8>, PlatformError> {
        const METHOD: &str = "file download";
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.bot_token)
            .send()
            .await
            .map_err(|e| PlatformError::transport(METHOD, e))?;
        if !resp.status().is_success() {
            return Err(PlatformError::api(METHOD, format!("HTTP {}", resp.status())));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| PlatformError::transport(METHOD, e))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Directory for SlackWebClient {
    async fn identity(&self) -> Result<BotIdentity, PlatformError> {
        const METHOD: &str = "auth.test";
        let body = self.call(METHOD, &[]).await?;
        Ok(BotIdentity {
            user_id: required_str(&body, METHOD, "user_id")?.to_string(),
            name: body["user"].as_str().unwrap_or_default().to_string(),
        })
    }

    async fn list_channels(&self) -> Result<Vec<PlatformChannel>, PlatformError> {
        let extra = [
            ("types", "public_channel,private_channel".to_string()),
            ("exclude_archived", "true".to_string()),
        ];
        let entries: Vec<ConversationEntry> =
            self.paginate("conversations.list", "channels", &extra).await?;
        Ok(entries
            .into_iter()
            .map(|c| {
                if c.is_private {
                    PlatformChannel::private(c.id, c.name)
                } else {
                    PlatformChannel::public(c.id, c.name)
                }
            })
            .collect())
    }

    async fn list_users(&self) -> Result<Vec<PlatformUser>, PlatformError> {
        let entries: Vec<MemberEntry> = self.paginate("users.list", "members", &[]).await?;
        Ok(entries
            .into_iter()
            .map(|m| PlatformUser {
                id: m.id,
                name: m.name,
                is_bot: m.is_bot,
            })
            .collect())
    }
}
