//! Notifier that only logs alerts. Used for dry runs.

use super::traits::{Notifier, NotifyError};
use crate::models::Subscriber;

#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, recipient: &Subscriber, body: &str) -> Result<(), NotifyError> {
        tracing::info!(
            subscriber = %recipient.email,
            chat_id = recipient.chat_id.as_deref().unwrap_or("-"),
            "Dry run alert:\n{}",
            body
        );
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "log"
    }
}
