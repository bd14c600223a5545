//! Telegram Bot API notifier.
//!
//! Delivers alerts via the Telegram Bot API `sendMessage` endpoint to the
//! chat each subscriber linked. In-flight requests are bounded by a
//! semaphore so a large subscriber list cannot flood the API.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use super::traits::{Notifier, NotifyError};
use crate::models::Subscriber;

const API_BASE: &str = "https://api.telegram.org";

/// Sends alerts via the Telegram Bot API.
#[derive(Debug)]
pub struct TelegramNotifier {
    bot_token: String,
    client: reqwest::Client,
    permits: Arc<Semaphore>,
}

/// Resolve a `${VAR}` reference to the environment variable's value.
///
/// Any other string is returned unchanged.
pub fn resolve_secret(value: &str) -> Result<String, NotifyError> {
    if !value.starts_with("${") {
        return Ok(value.to_string());
    }

    let var_name = value
        .strip_prefix("${")
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| NotifyError::Config(format!("Malformed env var reference: {value}")))?;
    std::env::var(var_name).map_err(|_| {
        NotifyError::Config(format!("Environment variable '{var_name}' is not set"))
    })
}

impl TelegramNotifier {
    /// Creates a new `TelegramNotifier` from configuration values.
    ///
    /// `bot_token` may be a `${VAR}` reference. Returns
    /// [`NotifyError::Config`] if the token is empty or the env var is missing.
    pub fn from_config(
        bot_token: &str,
        max_in_flight: usize,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let resolved_token = resolve_secret(bot_token)?;
        if resolved_token.trim().is_empty() {
            return Err(NotifyError::Config(
                "Telegram bot token must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            bot_token: resolved_token,
            client,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        })
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| NotifyError::Config(e.to_string()))?;

        let url = format!("{}/bot{}/sendMessage", API_BASE, self.bot_token);
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        tracing::debug!(chat_id, "Sending Telegram message");

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        let resp_body: serde_json::Value = response.json().await?;

        if resp_body.get("ok") == Some(&serde_json::Value::Bool(true)) {
            return Ok(());
        }

        // Handle rate limiting (HTTP 429).
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp_body
                .get("parameters")
                .and_then(|p| p.get("retry_after"))
                .and_then(|v| v.as_u64())
                .unwrap_or(30);
            return Err(NotifyError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let description = resp_body
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown Telegram API error");

        Err(NotifyError::Api(format!("Telegram API error: {description}")))
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, recipient: &Subscriber, body: &str) -> Result<(), NotifyError> {
        let chat_id = recipient
            .chat_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| NotifyError::MissingAddress {
                channel: "telegram",
                subscriber: recipient.email.clone(),
            })?;

        self.send_message(chat_id, body).await
    }

    fn channel_name(&self) -> &str {
        "telegram"
    }
}
