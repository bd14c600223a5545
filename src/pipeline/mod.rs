//! One scrape-and-notify pass, and the daily loop that repeats it.

mod error;
mod orchestrator;
mod schedule;

pub use error::{RunError, SourceError, SourceFailure};
pub use orchestrator::ScrapeOrchestrator;
pub use schedule::{next_run_after, parse_run_at};

use std::sync::Arc;

use chrono::{DateTime, Months, NaiveTime, Utc};
use tracing::{error, info, warn};

use crate::notify::{DispatchReport, NotifyEngine};
use crate::repository::ListingStore;

/// What a completed run did.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// New listings found and persisted.
    pub records_processed: usize,
    pub dispatch: DispatchReport,
    /// Old listings removed by the retention prune.
    pub pruned: usize,
}

pub struct Pipeline {
    store: Arc<dyn ListingStore>,
    orchestrator: ScrapeOrchestrator,
    engine: NotifyEngine,
    retention_months: u32,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn ListingStore>,
        orchestrator: ScrapeOrchestrator,
        engine: NotifyEngine,
        retention_months: u32,
    ) -> Self {
        Self {
            store,
            orchestrator,
            engine,
            retention_months,
        }
    }

    /// Scrape, persist, notify, then prune old listings.
    pub async fn run_once(&self) -> Result<RunSummary, RunError> {
        self.run_at(Utc::now()).await
    }

    /// [`run_once`](Self::run_once) with an explicit run start time.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunSummary, RunError> {
        let records = self.orchestrator.run(now).await?;

        let dispatch = self
            .engine
            .notify(&records)
            .await
            .map_err(RunError::Subscribers)?;

        let pruned = self.prune(now).await;

        info!(
            records = records.len(),
            delivered = dispatch.delivered,
            failed = dispatch.failed.len(),
            pruned,
            "Run complete"
        );

        Ok(RunSummary {
            records_processed: records.len(),
            dispatch,
            pruned,
        })
    }

    async fn prune(&self, now: DateTime<Utc>) -> usize {
        if self.retention_months == 0 {
            return 0;
        }
        let Some(cutoff) = now.checked_sub_months(Months::new(self.retention_months)) else {
            return 0;
        };
        match self.store.prune_listings(cutoff).await {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, cutoff = %cutoff, "Failed to prune old listings");
                0
            }
        }
    }

    /// Run once a day at `run_at` (UTC) until Ctrl-C.
    ///
    /// A failed run is logged and the loop waits for the next slot.
    pub async fn run_daily(&self, run_at: NaiveTime) {
        loop {
            let now = Utc::now();
            let next = next_run_after(now, run_at);
            let wait = (next - now).to_std().unwrap_or_default();
            info!(next = %next, "Waiting for next run");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutting down");
                    return;
                }
            }

            if let Err(e) = self.run_once().await {
                error!(kind = %e.kind(), error = %e, "Run failed");
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::TimeZone;

    use super::testing::{listing, StubExtractor};
    use super::*;
    use crate::dictionary::EntityDictionary;
    use crate::models::{NotificationMode, SourceId, Subscriber, WATERMARK_KEY};
    use crate::notify::testing::MockNotifier;
    use crate::repository::testing::{insert_raw_subscriber, setup_test_db};
    use crate::repository::DieselStore;
    use crate::scrapers::{ExtractError, SourceExtractor};

    async fn subscribe(store: &DieselStore, email: &str) {
        let mut sub = Subscriber::new(email.to_string());
        sub.notification = NotificationMode::Daily;
        sub.chat_id = Some("42".to_string());
        store.subscribers.save(&sub).await.unwrap();
    }

    fn pipeline(
        store: Arc<DieselStore>,
        extractors: Vec<Arc<dyn SourceExtractor>>,
        notifier: Arc<MockNotifier>,
    ) -> Pipeline {
        let dictionary = Arc::new(EntityDictionary::builder().build().unwrap());
        let orchestrator =
            ScrapeOrchestrator::new(store.clone(), extractors, Duration::from_secs(5));
        let engine = NotifyEngine::new(store.clone(), notifier, dictionary);
        Pipeline::new(store, orchestrator, engine, 3)
    }

    #[tokio::test]
    async fn test_run_persists_notifies_and_prunes() {
        let (pool, _dir) = setup_test_db().await;
        let store = Arc::new(DieselStore::new(pool));
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 23, 0, 0).unwrap();
        subscribe(&store, "everything@example.com").await;

        let stale = listing(
            SourceId::Flyday,
            "https://flyday.hk/old",
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        );
        store.bulk_insert(&[stale]).await.unwrap();

        let notifier = Arc::new(MockNotifier::default());
        let pipeline = pipeline(
            store.clone(),
            vec![
                Arc::new(StubExtractor::ok(
                    SourceId::Flyday,
                    vec![listing(SourceId::Flyday, "https://flyday.hk/new", now)],
                )),
                Arc::new(StubExtractor::ok(
                    SourceId::FlyAgain,
                    vec![listing(SourceId::FlyAgain, "https://flyagain.la/new", now)],
                )),
            ],
            notifier.clone(),
        );

        let summary = pipeline.run_at(now).await.unwrap();
        assert_eq!(summary.records_processed, 2);
        assert_eq!(summary.dispatch.delivered, 1);
        assert_eq!(summary.pruned, 1);
        assert_eq!(notifier.send_count(), 1);
        assert_eq!(store.listings.count().await.unwrap(), 2);
        assert_eq!(
            store.find_checkpoint(WATERMARK_KEY).await.unwrap(),
            Some(now)
        );
    }

    #[tokio::test]
    async fn test_failed_source_sends_nothing() {
        let (pool, _dir) = setup_test_db().await;
        let store = Arc::new(DieselStore::new(pool));
        subscribe(&store, "everything@example.com").await;

        let notifier = Arc::new(MockNotifier::default());
        let pipeline = pipeline(
            store.clone(),
            vec![
                Arc::new(StubExtractor::ok(
                    SourceId::Flyday,
                    vec![listing(SourceId::Flyday, "https://flyday.hk/new", Utc::now())],
                )),
                Arc::new(StubExtractor::failing(
                    SourceId::FlyAgain,
                    ExtractError::Status {
                        url: "https://flyagain.la/".to_string(),
                        status: 503,
                    },
                )),
            ],
            notifier.clone(),
        );

        let err = pipeline.run_once().await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Transient);
        assert_eq!(notifier.send_count(), 0);
        assert_eq!(store.listings.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_quiet_run_reports_zero() {
        let (pool, _dir) = setup_test_db().await;
        let store = Arc::new(DieselStore::new(pool));
        subscribe(&store, "everything@example.com").await;

        let notifier = Arc::new(MockNotifier::default());
        let pipeline = pipeline(
            store.clone(),
            vec![Arc::new(StubExtractor::ok(SourceId::Flyday, vec![]))],
            notifier.clone(),
        );

        let summary = pipeline.run_once().await.unwrap();
        assert_eq!(summary.records_processed, 0);
        assert_eq!(summary.dispatch.matched, 0);
        assert_eq!(notifier.send_count(), 0);
    }

    #[tokio::test]
    async fn test_listing_seen_twice_is_alerted_once() {
        let (pool, _dir) = setup_test_db().await;
        let store = Arc::new(DieselStore::new(pool));
        subscribe(&store, "everything@example.com").await;

        let published = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
        let first = Utc.with_ymd_and_hms(2024, 3, 2, 23, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 3, 3, 23, 0, 0).unwrap();

        let notifier = Arc::new(MockNotifier::default());
        let pipeline = pipeline(
            store.clone(),
            vec![Arc::new(StubExtractor::ok(
                SourceId::FlyAgain,
                vec![listing(SourceId::FlyAgain, "https://flyagain.la/3", published)],
            ))],
            notifier.clone(),
        );

        let summary = pipeline.run_at(first).await.unwrap();
        assert_eq!(summary.records_processed, 1);
        assert_eq!(notifier.send_count(), 1);

        let summary = pipeline.run_at(second).await.unwrap();
        assert_eq!(summary.records_processed, 0);
        assert_eq!(summary.dispatch.matched, 0);
        assert_eq!(notifier.send_count(), 1);
        assert_eq!(store.listings.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_subscriber_does_not_block_alerts() {
        let (pool, _dir) = setup_test_db().await;
        let store = Arc::new(DieselStore::new(pool.clone()));
        subscribe(&store, "everything@example.com").await;
        insert_raw_subscriber(&pool, "broken@example.com", "daily", "日本").await;

        let now = Utc.with_ymd_and_hms(2024, 3, 2, 23, 0, 0).unwrap();
        let notifier = Arc::new(MockNotifier::default());
        let pipeline = pipeline(
            store.clone(),
            vec![Arc::new(StubExtractor::ok(
                SourceId::Flyday,
                vec![listing(SourceId::Flyday, "https://flyday.hk/1", now)],
            ))],
            notifier.clone(),
        );

        let summary = pipeline.run_at(now).await.unwrap();
        assert_eq!(summary.dispatch.delivered, 1);
        assert_eq!(notifier.sent()[0].0, "everything@example.com");
    }
}
