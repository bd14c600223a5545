//! Fans alerts out to matching subscribers.
//!
//! Every matched subscriber gets exactly one alert per run. Sends run
//! concurrently and are joined once; a failed send is recorded in the
//! report and never stops the others.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;

use super::format::format_alert;
use super::matcher::AlertBatch;
use super::traits::{Notifier, NotifyError};
use crate::dictionary::EntityDictionary;
use crate::error::ErrorKind;
use crate::models::{ListingRecord, SubscriberFilter};
use crate::repository::{ListingStore, StoreError};

/// A single alert that could not be delivered.
#[derive(Debug)]
pub struct DispatchFailure {
    pub subscriber_id: String,
    pub email: String,
    pub channel: String,
    pub error: NotifyError,
}

impl DispatchFailure {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Dispatch
    }
}

/// Outcome of one notification pass.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Subscribers with at least one matching listing.
    pub matched: usize,
    pub delivered: usize,
    pub failed: Vec<DispatchFailure>,
}

pub struct NotifyEngine {
    store: Arc<dyn ListingStore>,
    notifier: Arc<dyn Notifier>,
    dictionary: Arc<EntityDictionary>,
}

impl NotifyEngine {
    pub fn new(
        store: Arc<dyn ListingStore>,
        notifier: Arc<dyn Notifier>,
        dictionary: Arc<EntityDictionary>,
    ) -> Self {
        Self {
            store,
            notifier,
            dictionary,
        }
    }

    /// Alert every daily subscriber about the listings that match them.
    ///
    /// Only a failure to load subscribers is returned as an error.
    pub async fn notify(&self, records: &[ListingRecord]) -> Result<DispatchReport, StoreError> {
        if records.is_empty() {
            tracing::debug!("No new listings, skipping notifications");
            return Ok(DispatchReport::default());
        }

        let subscribers = self
            .store
            .find_subscribers(SubscriberFilter::daily())
            .await?;
        let batch = AlertBatch::build(&subscribers, records);
        let channel = self.notifier.channel_name().to_string();

        tracing::info!(
            subscribers = subscribers.len(),
            matched = batch.len(),
            channel = %channel,
            "Dispatching alerts"
        );

        let sends = batch.alerts.iter().map(|alert| async move {
            let body = format_alert(&self.dictionary, alert.subscriber, &alert.records);
            let start = Instant::now();
            let result = self.notifier.send(alert.subscriber, &body).await;
            (alert, result, start.elapsed().as_millis() as u64)
        });
        let results = join_all(sends).await;

        let mut report = DispatchReport {
            matched: batch.len(),
            ..Default::default()
        };

        for (alert, result, duration_ms) in results {
            let subscriber = alert.subscriber;
            match result {
                Ok(()) => {
                    tracing::info!(
                        subscriber = %subscriber.email,
                        listings = alert.records.len(),
                        channel = %channel,
                        duration_ms,
                        "Alert delivered"
                    );
                    report.delivered += 1;
                }
                Err(error) => {
                    tracing::warn!(
                        subscriber = %subscriber.email,
                        channel = %channel,
                        error = %error,
                        duration_ms,
                        "Alert delivery failed"
                    );
                    report.failed.push(DispatchFailure {
                        subscriber_id: subscriber.id.clone(),
                        email: subscriber.email.clone(),
                        channel: channel.clone(),
                        error,
                    });
                }
            }
        }

        Ok(report)
    }
}
