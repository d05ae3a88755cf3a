use std::sync::atomic::{AtomicU64, Ordering};
use anyhow::anyhow;
use async_trait::async_trait;
use derive_more::{Display, Error};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use crate::config::MatrixConfig;
use crate::domain::GiveawayId;
use crate::notifier::{Message, MessageSender};

const MESSAGE_EVENT_TYPE: &str = "m.room.message";
const HTML_FORMAT: &str = "org.matrix.custom.html";

#[derive(Debug, Display, Error)]
#[display("the homeserver rejected the message with status {status}: {errcode} ({message})")]
pub struct MatrixError {
    pub status: StatusCode,
    pub errcode: String,
    pub message: String,
}

#[derive(Serialize)]
struct RoomMessageContent<'a> {
    msgtype: &'static str,
    body: &'a str,
    format: &'static str,
    formatted_body: &'a str,
}

#[derive(Deserialize, Default)]
struct ErrorResponse {
    #[serde(default)]
    errcode: String,
    #[serde(default)]
    error: String,
}

#[derive(Deserialize)]
struct SendResponse {
    event_id: String,
}

/// Posts messages into one room through the Matrix client-server API.
pub struct MatrixClient {
    http: Client,
    config: MatrixConfig,
    txn_counter: AtomicU64,
}

impl MatrixClient {
    pub fn new(http: Client, config: MatrixConfig) -> Self {
        Self {
            http,
            config,
            txn_counter: AtomicU64::new(0),
        }
    }

    /// Transaction IDs must be unique per access token, otherwise the homeserver deduplicates the event.
    fn next_txn_id(&self, id: GiveawayId) -> String {
        let counter = self.txn_counter.fetch_add(1, Ordering::Relaxed);
        format!("freegames-{}-{counter}-{id}", chrono::Utc::now().timestamp_millis())
    }

    fn send_url(&self, txn_id: &str) -> anyhow::Result<Url> {
        let mut url = self.config.homeserver.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("invalid homeserver URL: {}", self.config.homeserver))?
            .pop_if_empty()
            .extend(["_matrix", "client", "v3", "rooms", self.config.room_id.as_str(), "send", MESSAGE_EVENT_TYPE, txn_id]);
        Ok(url)
    }
}

#[async_trait]
impl MessageSender for MatrixClient {
    async fn send(&self, message: &Message) -> anyhow::Result<()> {
        let url = self.send_url(&self.next_txn_id(message.id))?;
        let content = RoomMessageContent {
            msgtype: "m.text",
            body: &message.plain,
            format: HTML_FORMAT,
            formatted_body: &message.html,
        };

        let resp = self.http.put(url)
            .bearer_auth(&self.config.access_token)
            .json(&content)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body: ErrorResponse = resp.json().await.unwrap_or_default();
            return Err(MatrixError {
                status,
                errcode: body.errcode,
                message: body.error,
            }.into())
        }

        let SendResponse { event_id } = resp.json().await?;
        log::debug!("{} posted event {event_id} to {}", self.config.user, self.config.room_id);
        Ok(())
    }
}
