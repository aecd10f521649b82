//! Telegram Bot API chat transport.
//!
//! Long-polls `getUpdates` and replies with `sendMessage`. Both direct
//! messages and channel posts are accepted; anything without text is skipped
//! but still acknowledged through the update offset.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::bot_config::TelegramConfig;
use crate::domain::error::ChattraderError;
use crate::ports::chat_port::{ChatPort, InboundMessage};

/// Headroom on top of the long-poll timeout before the HTTP client gives up.
const CLIENT_TIMEOUT_SLACK_SECS: u64 = 10;

pub struct TelegramAdapter {
    http: reqwest::Client,
    api_url: String,
    token: SecretString,
    poll_timeout_secs: u64,
    allowed_channels: HashSet<i64>,
    next_offset: AtomicI64,
}

impl TelegramAdapter {
    pub fn new(
        config: TelegramConfig,
        allowed_channels: HashSet<i64>,
    ) -> Result<Self, ChattraderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(
                config.poll_timeout_secs + CLIENT_TIMEOUT_SLACK_SECS,
            ))
            .build()
            .map_err(|e| transport(format!("http client setup failed: {}", e.without_url())))?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token,
            poll_timeout_secs: config.poll_timeout_secs,
            allowed_channels,
            next_offset: AtomicI64::new(0),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_url, self.token.expose_secret())
    }

    /// Errors from reqwest embed the request URL, which contains the token.
    async fn call<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
    ) -> Result<T, ChattraderError> {
        let resp = request
            .send()
            .await
            .map_err(|e| transport(format!("{method} failed: {}", e.without_url())))?;
        let status = resp.status();
        let body: ApiResponse<T> = resp.json().await.map_err(|e| {
            transport(format!(
                "{method} returned status {} with an unreadable body: {}",
                status.as_u16(),
                e.without_url()
            ))
        })?;

        match body {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(transport(format!(
                "{method} returned status {}: {}",
                status.as_u16(),
                description.unwrap_or_else(|| "no description".to_string())
            ))),
        }
    }

    fn accept(&self, updates: Vec<Update>) -> Vec<InboundMessage> {
        let mut messages = Vec::new();
        for update in updates {
            self.next_offset
                .fetch_max(update.update_id + 1, Ordering::SeqCst);
            let Some(post) = update.message.or(update.channel_post) else {
                continue;
            };
            let Some(text) = post.text else {
                debug!(update_id = update.update_id, "skipping non-text update");
                continue;
            };
            if !self.allowed_channels.contains(&post.chat.id) {
                debug!(channel_id = post.chat.id, "ignoring update from unlisted chat");
                continue;
            }
            messages.push(InboundMessage {
                channel_id: post.chat.id,
                text,
            });
        }
        messages
    }
}

fn transport(reason: String) -> ChattraderError {
    ChattraderError::Transport { reason }
}

#[async_trait]
impl ChatPort for TelegramAdapter {
    async fn poll(&self) -> Result<Vec<InboundMessage>, ChattraderError> {
        let offset = self.next_offset.load(Ordering::SeqCst);
        let request = self.http.get(self.method_url("getUpdates")).query(&[
            ("offset", offset.to_string()),
            ("timeout", self.poll_timeout_secs.to_string()),
            (
                "allowed_updates",
                r#"["message","channel_post"]"#.to_string(),
            ),
        ]);
        let updates: Vec<Update> = self.call(request, "getUpdates").await?;
        Ok(self.accept(updates))
    }

    async fn send(&self, channel_id: i64, text: &str) -> Result<(), ChattraderError> {
        let request = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&SendMessage {
                chat_id: channel_id,
                text,
            });
        let _: serde_json::Value = self.call(request, "sendMessage").await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Post>,
    channel_post: Option<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    chat: Chat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}
