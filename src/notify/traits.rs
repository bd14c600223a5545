//! Notifier trait definition and shared error types.

use crate::models::Subscriber;

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no {channel} address for subscriber {subscriber}")]
    MissingAddress {
        channel: &'static str,
        subscriber: String,
    },

    #[error("{0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
}

/// Delivery channel for alert bodies.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `body` to `recipient`. No retries.
    async fn send(&self, recipient: &Subscriber, body: &str) -> Result<(), NotifyError>;

    /// Human-readable name for this channel (e.g., "telegram", "log").
    fn channel_name(&self) -> &str;
}
