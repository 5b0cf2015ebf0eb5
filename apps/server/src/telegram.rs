//! Telegram Bot API client and update envelope models.
//!
//! Only the fields this bot reads are modeled; Telegram sends many more
//! and serde ignores them. Replies go out through the [`ReplySink`] trait
//! so the pipeline wiring never depends on Telegram directly - tests
//! substitute a recording sink.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// An incoming update from the Telegram webhook.
#[derive(Debug, Deserialize)]
pub struct Update {
    /// Monotonic update identifier (unused beyond logging)
    pub update_id: i64,
    /// Present for message updates; absent for edits, callbacks, etc.
    #[serde(default)]
    pub message: Option<Message>,
}

/// A chat message inside an update.
#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    /// Present for text messages; absent for photos, stickers, etc.
    #[serde(default)]
    pub text: Option<String>,
}

/// The chat a message belongs to.
#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// The sender of a message.
#[derive(Debug, Deserialize)]
pub struct User {
    #[serde(default)]
    pub first_name: Option<String>,
}

/// Delivery channel for replies back to the originating chat.
///
/// This is the statically known interface the inbound adapter implements;
/// there is no runtime capability probing.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Deliver one reply to one chat.
    async fn send_reply(&self, chat_id: i64, text: &str) -> anyhow::Result<()>;
}

/// Thin client for the Telegram Bot API methods this bot uses.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    /// Create a client for the given bot token and API base URL.
    pub fn new(token: &str, base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call(&self, method: &str, body: serde_json::Value) -> anyhow::Result<()> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("Telegram {} returned HTTP {}: {}", method, status, detail);
        }

        debug!("Telegram {} ok", method);
        Ok(())
    }

    /// Register the webhook URL with Telegram.
    pub async fn set_webhook(&self, url: &str) -> anyhow::Result<()> {
        self.call("setWebhook", json!({ "url": url })).await
    }

    /// Remove the webhook registration.
    pub async fn delete_webhook(&self) -> anyhow::Result<()> {
        self.call("deleteWebhook", json!({})).await
    }

    /// Send a text message to a chat, with Telegram HTML markup enabled.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
        self.call(
            "sendMessage",
            json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "HTML",
            }),
        )
        .await
    }
}

#[async_trait]
impl ReplySink for TelegramClient {
    async fn send_reply(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
        self.send_message(chat_id, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_parses_text_message() {
        let json = r#"{
            "update_id": 1001,
            "message": {
                "message_id": 7,
                "chat": { "id": 42, "type": "private" },
                "from": { "id": 9, "is_bot": false, "first_name": "Ada" },
                "text": "bitcoin"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("bitcoin"));
        assert_eq!(
            message.from.unwrap().first_name.as_deref(),
            Some("Ada")
        );
    }

    #[test]
    fn test_update_tolerates_non_message_updates() {
        let update: Update =
            serde_json::from_str(r#"{ "update_id": 1002, "edited_message": {} }"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_method_url_embeds_token() {
        let client = TelegramClient::new(
            "abc123",
            "https://api.telegram.org/",
            Duration::from_secs(8),
        );
        assert_eq!(
            client.method_url("sendMessage"),
            "https://api.telegram.org/botabc123/sendMessage"
        );
    }
}
