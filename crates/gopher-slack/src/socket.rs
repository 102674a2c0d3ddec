//! Socket Mode listener: receives Slack events over a WebSocket.
//!
//! - `apps.connections.open` (app token) yields a one-off WebSocket URL
//! - every envelope is ACKed before its payload is processed
//! - `message` and `team_join` events are published to the event bus
//! - reconnects with linear backoff, up to a maximum number of attempts
//!
//! Filtering (bots, subtypes, our own messages) is left to the dispatcher,
//! which sees the raw event fields.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{Mutex, Notify};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info, warn};

use gopher_core::bus::{EventBus, InboundEvent};
use gopher_core::config::schema::SlackConfig;
use gopher_core::types::{MessageEvent, NewMember};

/// Reconnect backoff step (seconds); the delay grows linearly up to 6 steps.
const RECONNECT_DELAY_SECS: u64 = 5;

const MAX_RECONNECT_ATTEMPTS: u32 = 10;

/// Socket Mode envelope received from Slack.
#[derive(Debug, Clone, Deserialize)]
struct SocketEnvelope {
    /// Must be ACKed immediately.
    envelope_id: String,
    /// `"events_api"`, `"slash_commands"`, `"interactive"`.
    #[serde(rename = "type")]
    envelope_type: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Debug, Serialize)]
struct SocketAck {
    envelope_id: String,
}

type WsSender = futures_util::stream::SplitSink<
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
    WsMessage,
>;

/// Feeds Slack events into the event bus.
pub struct SocketModeListener {
    app_token: String,
    api_base: String,
    bus: Arc<EventBus>,
    http: reqwest::Client,
    shutdown: Arc<Notify>,
    ws_write: Arc<Mutex<Option<WsSender>>>,
}

impl SocketModeListener {
    pub fn new(config: &SlackConfig, bus: Arc<EventBus>) -> Self {
        Self {
            app_token: config.app_token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bus,
            http: reqwest::Client::new(),
            shutdown: Arc::new(Notify::new()),
            ws_write: Arc::new(Mutex::new(None)),
        }
    }

    /// Call `apps.connections.open` to get a WebSocket URL.
    async fn get_ws_url(&self) -> anyhow::Result<String> {
        let resp = self
            .http
            .post(format!("{}/apps.connections.open", self.api_base))
            .bearer_auth(&self.app_token)
            .send()
            .await?;

        let body: Value = resp.json().await?;
        if body["ok"].as_bool() != Some(true) {
            let err = body["error"].as_str().unwrap_or("unknown");
            anyhow::bail!("apps.connections.open failed: {}", err);
        }

        let url = body["url"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("no url in apps.connections.open response"))?;

        Ok(url.to_string())
    }

    /// Connect and listen until shutdown or until reconnects are exhausted.
    pub async fn run(&self) -> anyhow::Result<()> {
        if self.app_token.is_empty() {
            anyhow::bail!("slack app token is empty (required for Socket Mode)");
        }

        let mut attempts: u32 = 0;

        loop {
            if attempts > 0 {
                let delay = Duration::from_secs(RECONNECT_DELAY_SECS * (attempts as u64).min(6));
                info!(
                    attempt = attempts,
                    delay_secs = delay.as_secs(),
                    "reconnecting to Slack Socket Mode..."
                );
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = self.shutdown.notified() => {
                        info!("shutdown during reconnect backoff");
                        return Ok(());
                    }
                }
            }

            if attempts >= MAX_RECONNECT_ATTEMPTS {
                anyhow::bail!("exceeded max reconnect attempts ({})", MAX_RECONNECT_ATTEMPTS);
            }

            let ws_url = match self.get_ws_url().await {
                Ok(url) => url,
                Err(e) => {
                    error!(error = %e, "failed to get Socket Mode URL");
                    attempts += 1;
                    continue;
                }
            };

            let ws_stream = match tokio_tungstenite::connect_async(ws_url.as_str()).await {
                Ok((stream, _)) => {
                    info!("connected to Slack Socket Mode");
                    attempts = 0;
                    stream
                }
                Err(e) => {
                    error!(error = %e, "WebSocket connect failed");
                    attempts += 1;
                    continue;
                }
            };

            let (write, mut read) = ws_stream.split();
            *self.ws_write.lock().await = Some(write);

            loop {
                tokio::select! {
                    msg = read.next() => {
                        match msg {
                            Some(Ok(WsMessage::Text(text))) => {
                                if self.handle_ws_message(&text).await.is_break() {
                                    break;
                                }
                            }
                            Some(Ok(WsMessage::Ping(data))) => {
                                let mut guard = self.ws_write.lock().await;
                                if let Some(ref mut w) = *guard {
                                    let _ = w.send(WsMessage::Pong(data)).await;
                                }
                            }
                            Some(Ok(WsMessage::Close(_))) => {
                                info!("Slack WebSocket closed by server");
                                break;
                            }
                            Some(Err(e)) => {
                                warn!(error = %e, "Slack WebSocket error");
                                break;
                            }
                            None => {
                                info!("Slack WebSocket stream ended");
                                break;
                            }
                            _ => {}
                        }
                    }
                    _ = self.shutdown.notified() => {
                        info!("shutdown signal received");
                        self.close_socket().await;
                        return Ok(());
                    }
                }
            }

            self.close_socket().await;
            attempts += 1;
        }
    }

    /// Ask a running listener to stop.
    pub async fn stop(&self) {
        info!("stopping Socket Mode listener");
        self.shutdown.notify_waiters();
        self.close_socket().await;
    }

    async fn close_socket(&self) {
        let mut guard = self.ws_write.lock().await;
        if let Some(ref mut w) = *guard {
            let _ = w.close().await;
        }
        *guard = None;
    }

    /// Handle one WebSocket text frame. Breaks when Slack asks us to reconnect.
    async fn handle_ws_message(&self, text: &str) -> std::ops::ControlFlow<()> {
        use std::ops::ControlFlow;

        if let Ok(msg) = serde_json::from_str::<Value>(text) {
            match msg["type"].as_str() {
                Some("hello") => {
                    info!("received Socket Mode hello");
                    return ControlFlow::Continue(());
                }
                Some("disconnect") => {
                    let reason = msg["reason"].as_str().unwrap_or("unknown");
                    info!(reason = %reason, "Slack requested disconnect");
                    return ControlFlow::Break(());
                }
                _ => {}
            }
        }

        let envelope: SocketEnvelope = match serde_json::from_str(text) {
            Ok(e) => e,
            Err(e) => {
                debug!(error = %e, "failed to parse Socket Mode envelope");
                return ControlFlow::Continue(());
            }
        };

        self.ack(&envelope.envelope_id).await;
        self.process_envelope(envelope).await;
        ControlFlow::Continue(())
    }

    async fn ack(&self, envelope_id: &str) {
        let ack = SocketAck {
            envelope_id: envelope_id.to_string(),
        };
        if let Ok(ack_json) = serde_json::to_string(&ack) {
            let mut guard = self.ws_write.lock().await;
            if let Some(ref mut w) = *guard {
                if let Err(e) = w.send(WsMessage::Text(ack_json.into())).await {
                    warn!(error = %e, "failed to send ACK");
                }
            }
        }
    }

    /// Publish the event carried by an `events_api` envelope.
    async fn process_envelope(&self, envelope: SocketEnvelope) {
        if envelope.envelope_type != "events_api" {
            debug!(envelope_type = %envelope.envelope_type, "ignoring non-events_api envelope");
            return;
        }

        let Some(event) = parse_event(&envelope.payload["event"]) else {
            return;
        };

        debug!(kind = event.kind(), "publishing inbound event");
        if let Err(e) = self.bus.publish(event).await {
            error!(error = %e, "failed to publish inbound event");
        }
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value[key].as_str().unwrap_or_default().to_string()
}

fn opt_field(value: &Value, key: &str) -> Option<String> {
    value[key].as_str().map(String::from)
}

/// Convert a Slack event object into an inbound event.
///
/// Returns `None` for event types the bot does not handle.
fn parse_event(event: &Value) -> Option<InboundEvent> {
    match event["type"].as_str().unwrap_or_default() {
        "message" => {
            let mut msg = MessageEvent::new(
                str_field(event, "channel"),
                str_field(event, "user"),
                str_field(event, "text"),
            )
            .with_ts(str_field(event, "ts"));
            msg.bot_id = opt_field(event, "bot_id");
            msg.subtype = opt_field(event, "subtype");
            msg.channel_type = opt_field(event, "channel_type");

            // Older payloads carry `file`, current ones a `files` array
            let file = event
                .get("files")
                .and_then(|f| f.get(0))
                .or_else(|| event.get("file"));
            if let Some(file) = file {
                msg = msg.with_file(str_field(file, "id"), str_field(file, "filetype"));
            }
            Some(msg.into())
        }
        "team_join" => {
            let user = &event["user"];
            let member = NewMember {
                id: str_field(user, "id"),
                name: str_field(user, "name"),
            };
            if member.id.is_empty() {
                debug!("team_join without user id");
                return None;
            }
            Some(member.into())
        }
        other => {
            debug!(event_type = %other, "ignoring event type");
            None
        }
    }
}
