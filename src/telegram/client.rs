//! Telegram Bot API client for status notifications.

use std::future::Future;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Maximum message length accepted by the Bot API.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Errors that can occur while delivering a message.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Request to Telegram failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Telegram rejected the message (status {status}): {description}")]
    Api { status: u16, description: String },
}

/// Destination for outgoing status messages.
pub trait Notifier {
    /// Delivers `text`, returning whether delivery succeeded.
    ///
    /// Failures are logged and never propagated.
    fn send_message(&self, text: &str) -> impl Future<Output = bool> + Send;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Bot API client bound to a single chat.
pub struct TelegramBot {
    http: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramBot {
    /// Creates a new bot client.
    #[must_use]
    pub fn new(
        http: Client,
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Sends a plain-text message to the configured chat.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Request`] on transport failures and
    /// [`TelegramError::Api`] when the Bot API refuses the message.
    pub async fn try_send_message(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);

        let text = if text.chars().count() > MAX_MESSAGE_LENGTH {
            warn!("Message exceeds {MAX_MESSAGE_LENGTH} characters, truncating");
            text.chars().take(MAX_MESSAGE_LENGTH).collect()
        } else {
            text.to_owned()
        };

        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        // The URL carries the bot token, keep it out of error messages.
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TelegramError::Request(e.without_url()))?;

        let status = response.status();
        let body: Option<ApiResponse> = response.json().await.ok();

        match body {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiResponse { description, .. }) => Err(TelegramError::Api {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "sendMessage failed".to_owned()),
            }),
            None => Err(TelegramError::Api {
                status: status.as_u16(),
                description: "unreadable response body".to_owned(),
            }),
        }
    }
}

impl Notifier for TelegramBot {
    async fn send_message(&self, text: &str) -> bool {
        match self.try_send_message(text).await {
            Ok(()) => {
                debug!("Message sent: {}", text);
                true
            }
            Err(e) => {
                error!("Failed to send message: {}", e);
                false
            }
        }
    }
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot")
            .field("api_url", &self.api_url)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{refused_url, serve_once, test_client};

    #[tokio::test]
    async fn test_send_message_posts_to_chat() {
        let (base, request) = serve_once("200 OK", r#"{"ok": true, "result": {}}"#).await;
        let bot = TelegramBot::new(test_client(), format!("{base}/"), "tok", "42");

        assert!(bot.send_message("hello").await);

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /bottok/sendMessage "), "{request}");
        assert!(request.contains(r#""chat_id":"42""#), "{request}");
        assert!(request.contains(r#""text":"hello""#), "{request}");
    }

    #[tokio::test]
    async fn test_send_message_api_rejection() {
        let (base, _request) = serve_once(
            "400 Bad Request",
            r#"{"ok": false, "description": "Bad Request: chat not found"}"#,
        )
        .await;
        let bot = TelegramBot::new(test_client(), base, "tok", "42");

        match bot.try_send_message("hello").await {
            Err(TelegramError::Api {
                status,
                description,
            }) => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_message_connection_failure_returns_false() {
        let url = refused_url().await;
        let bot = TelegramBot::new(test_client(), url, "secret-token", "42");

        let err = bot.try_send_message("hello").await.unwrap_err();
        assert!(matches!(err, TelegramError::Request(_)));
        assert!(!err.to_string().contains("secret-token"));

        assert!(!bot.send_message("hello").await);
    }

    #[tokio::test]
    async fn test_long_message_is_truncated() {
        let (base, request) = serve_once("200 OK", r#"{"ok": true}"#).await;
        let bot = TelegramBot::new(test_client(), base, "tok", "42");

        let long = "x".repeat(MAX_MESSAGE_LENGTH + 10);
        assert!(bot.send_message(&long).await);

        let request = request.await.unwrap();
        assert!(request.contains(&"x".repeat(MAX_MESSAGE_LENGTH)));
        assert!(!request.contains(&"x".repeat(MAX_MESSAGE_LENGTH + 1)));
    }
}
