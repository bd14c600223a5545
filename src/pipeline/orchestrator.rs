//! Runs every source extractor against the stored watermark and persists
//! what they find.
//!
//! All sources are scraped concurrently, one task each, and every task is
//! joined before anything is written. A single failed source aborts the
//! run without persisting or moving the watermark.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use super::error::{RunError, SourceError, SourceFailure};
use crate::error::ErrorKind;
use crate::models::{ListingRecord, Watermark, WATERMARK_KEY};
use crate::repository::ListingStore;
use crate::scrapers::{ExtractError, SourceExtractor};

pub struct ScrapeOrchestrator {
    store: Arc<dyn ListingStore>,
    extractors: Vec<Arc<dyn SourceExtractor>>,
    source_timeout: Duration,
}

impl ScrapeOrchestrator {
    pub fn new(
        store: Arc<dyn ListingStore>,
        extractors: Vec<Arc<dyn SourceExtractor>>,
        source_timeout: Duration,
    ) -> Self {
        Self {
            store,
            extractors,
            source_timeout,
        }
    }

    /// Scrape all sources once. `now` becomes the new watermark.
    ///
    /// Returns the listings this run actually persisted, in extractor order.
    /// Anything already stored by an earlier run is left out.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<Vec<ListingRecord>, RunError> {
        let previous = self
            .store
            .find_checkpoint(WATERMARK_KEY)
            .await
            .map_err(RunError::Watermark)?;

        info!(
            sources = self.extractors.len(),
            watermark = ?previous,
            "Starting scrape"
        );

        let scraped = self.fetch_all(previous).await?;

        let records = if scraped.is_empty() {
            info!("No new listings");
            scraped
        } else {
            let inserted = self
                .store
                .bulk_insert(&scraped)
                .await
                .map_err(RunError::Persist)?;
            info!(
                scraped = scraped.len(),
                inserted = inserted.len(),
                "Stored new listings"
            );
            inserted
        };

        let next = Watermark::advance(previous, now);
        self.store
            .upsert_checkpoint(WATERMARK_KEY, next.at)
            .await
            .map_err(RunError::Checkpoint)?;

        Ok(records)
    }

    async fn fetch_all(
        &self,
        watermark: Option<DateTime<Utc>>,
    ) -> Result<Vec<ListingRecord>, RunError> {
        let mut tasks = JoinSet::new();

        for (index, extractor) in self.extractors.iter().enumerate() {
            let extractor = Arc::clone(extractor);
            let limit = self.source_timeout;
            tasks.spawn(async move {
                let source = extractor.source_id();
                let outcome =
                    AssertUnwindSafe(tokio::time::timeout(limit, extractor.extract(watermark)))
                        .catch_unwind()
                        .await;
                let result = match outcome {
                    Ok(Ok(Ok(records))) => Ok(records),
                    Ok(Ok(Err(e))) => Err(SourceError::Extract(e)),
                    Ok(Err(_)) => Err(SourceError::Extract(ExtractError::Timeout(limit))),
                    Err(payload) => Err(SourceError::Panicked(panic_message(payload))),
                };
                (index, source, result)
            });
        }

        let mut slots: Vec<Option<Vec<ListingRecord>>> = vec![None; self.extractors.len()];
        let mut failures = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, source, Ok(records))) => {
                    info!(source = %source, count = records.len(), "Source scraped");
                    slots[index] = Some(records);
                }
                Ok((_, source, Err(error))) => {
                    failures.push(SourceFailure {
                        source_id: source,
                        error,
                    });
                }
                Err(e) => {
                    // Only reachable if the set is aborted; the slot stays empty.
                    warn!(error = %e, "Extractor task did not complete");
                }
            }
        }

        for (slot, extractor) in slots.iter().zip(&self.extractors) {
            let source = extractor.source_id();
            if slot.is_none() && !failures.iter().any(|f| f.source_id == source) {
                failures.push(SourceFailure {
                    source_id: source,
                    error: SourceError::Panicked("task did not complete".to_string()),
                });
            }
        }

        if !failures.is_empty() {
            for failure in &failures {
                log_failure(failure);
            }
            return Err(RunError::Extraction(failures));
        }

        Ok(slots.into_iter().flatten().flatten().collect())
    }
}

fn log_failure(failure: &SourceFailure) {
    match failure.kind() {
        ErrorKind::Structural => error!(
            source = %failure.source_id,
            error = %failure.error,
            "Listing page structure changed, extractor needs updating"
        ),
        kind => warn!(
            source = %failure.source_id,
            kind = %kind,
            error = %failure.error,
            "Source scrape failed"
        ),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceId;
    use crate::notify::testing::{FailOn, FailingStore};
    use crate::pipeline::testing::{listing, StubExtractor};
    use crate::repository::testing::setup_test_db;
    use crate::repository::DieselStore;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn store(pool: crate::repository::SqlitePool) -> Arc<DieselStore> {
        Arc::new(DieselStore::new(pool))
    }

    #[tokio::test]
    async fn test_structural_failure_persists_nothing() {
        let (pool, _dir) = setup_test_db().await;
        let store = store(pool);
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 23, 0, 0).unwrap();

        let good = StubExtractor::ok(
            SourceId::Flyday,
            vec![
                listing(SourceId::Flyday, "https://flyday.hk/1", now),
                listing(SourceId::Flyday, "https://flyday.hk/2", now),
                listing(SourceId::Flyday, "https://flyday.hk/3", now),
            ],
        );
        let broken = StubExtractor::failing(
            SourceId::FlyAgain,
            ExtractError::MissingField {
                field: "date",
                index: 0,
            },
        );

        let extractors: Vec<Arc<dyn SourceExtractor>> = vec![Arc::new(good), Arc::new(broken)];
        let orchestrator =
            ScrapeOrchestrator::new(store.clone(), extractors, Duration::from_secs(5));
        let err = orchestrator.run(now).await.unwrap_err();

        match &err {
            RunError::Extraction(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].source_id, SourceId::FlyAgain);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(store.listings.count().await.unwrap(), 0);
        assert_eq!(store.find_checkpoint(WATERMARK_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_successful_run_persists_and_advances_watermark() {
        let (pool, _dir) = setup_test_db().await;
        let store = store(pool);
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 23, 0, 0).unwrap();

        let orchestrator = ScrapeOrchestrator::new(
            store.clone(),
            vec![
                Arc::new(StubExtractor::ok(
                    SourceId::Flyday,
                    vec![listing(SourceId::Flyday, "https://flyday.hk/1", now)],
                )),
                Arc::new(StubExtractor::ok(
                    SourceId::FlyAgain,
                    vec![listing(SourceId::FlyAgain, "https://flyagain.la/1", now)],
                )),
            ],
            Duration::from_secs(5),
        );

        let records = orchestrator.run(now).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, SourceId::Flyday);
        assert_eq!(records[1].source, SourceId::FlyAgain);
        assert_eq!(store.listings.count().await.unwrap(), 2);
        assert_eq!(
            store.find_checkpoint(WATERMARK_KEY).await.unwrap(),
            Some(now)
        );
    }

    #[tokio::test]
    async fn test_empty_run_still_advances_watermark() {
        let (pool, _dir) = setup_test_db().await;
        let store = store(pool);
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 23, 0, 0).unwrap();

        let orchestrator = ScrapeOrchestrator::new(
            store.clone(),
            vec![Arc::new(StubExtractor::ok(SourceId::Flyday, vec![]))],
            Duration::from_secs(5),
        );

        assert!(orchestrator.run(now).await.unwrap().is_empty());
        assert_eq!(store.listings.count().await.unwrap(), 0);
        assert_eq!(
            store.find_checkpoint(WATERMARK_KEY).await.unwrap(),
            Some(now)
        );
    }

    #[tokio::test]
    async fn test_watermark_is_passed_and_never_moves_back() {
        let (pool, _dir) = setup_test_db().await;
        let store = store(pool);
        let later = Utc.with_ymd_and_hms(2024, 3, 5, 23, 0, 0).unwrap();
        let earlier = later - ChronoDuration::days(2);
        store.upsert_checkpoint(WATERMARK_KEY, later).await.unwrap();

        let extractor = Arc::new(StubExtractor::ok(SourceId::Flyday, vec![]));
        let extractors: Vec<Arc<dyn SourceExtractor>> = vec![extractor.clone()];
        let orchestrator =
            ScrapeOrchestrator::new(store.clone(), extractors, Duration::from_secs(5));

        orchestrator.run(earlier).await.unwrap();
        assert_eq!(extractor.seen_watermarks(), vec![Some(later)]);
        assert_eq!(
            store.find_checkpoint(WATERMARK_KEY).await.unwrap(),
            Some(later)
        );
    }

    #[tokio::test]
    async fn test_slow_source_times_out() {
        let (pool, _dir) = setup_test_db().await;
        let store = store(pool);

        let orchestrator = ScrapeOrchestrator::new(
            store.clone(),
            vec![Arc::new(
                StubExtractor::ok(SourceId::Flyday, vec![]).with_delay(Duration::from_secs(5)),
            )],
            Duration::from_millis(50),
        );

        let err = orchestrator.run(Utc::now()).await.unwrap_err();
        match err {
            RunError::Extraction(failures) => {
                assert!(matches!(
                    failures[0].error,
                    SourceError::Extract(ExtractError::Timeout(_))
                ));
                assert_eq!(failures[0].kind(), ErrorKind::Transient);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_panicking_source_is_reported() {
        let (pool, _dir) = setup_test_db().await;
        let store = store(pool);

        let orchestrator = ScrapeOrchestrator::new(
            store.clone(),
            vec![
                Arc::new(StubExtractor::panicking(SourceId::FlyAgain)),
                Arc::new(StubExtractor::ok(SourceId::Flyday, vec![])),
            ],
            Duration::from_secs(5),
        );

        let err = orchestrator.run(Utc::now()).await.unwrap_err();
        match err {
            RunError::Extraction(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].source_id, SourceId::FlyAgain);
                assert!(matches!(failures[0].error, SourceError::Panicked(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.find_checkpoint(WATERMARK_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rerun_returns_only_unstored_listings() {
        let (pool, _dir) = setup_test_db().await;
        let store = store(pool);
        // Date-only posts sit at midnight, so one can pass two consecutive watermarks.
        let published = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
        let first = Utc.with_ymd_and_hms(2024, 3, 2, 23, 0, 0).unwrap();
        let second = first + ChronoDuration::days(1);

        let orchestrator = ScrapeOrchestrator::new(
            store.clone(),
            vec![Arc::new(StubExtractor::ok(
                SourceId::FlyAgain,
                vec![listing(SourceId::FlyAgain, "https://flyagain.la/3", published)],
            ))],
            Duration::from_secs(5),
        );

        assert_eq!(orchestrator.run(first).await.unwrap().len(), 1);
        assert!(orchestrator.run(second).await.unwrap().is_empty());
        assert_eq!(store.listings.count().await.unwrap(), 1);
        assert_eq!(
            store.find_checkpoint(WATERMARK_KEY).await.unwrap(),
            Some(second)
        );
    }

    #[tokio::test]
    async fn test_insert_failure_keeps_watermark() {
        let store = Arc::new(FailingStore::new(FailOn::Insert));
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 23, 0, 0).unwrap();

        let orchestrator = ScrapeOrchestrator::new(
            store.clone(),
            vec![Arc::new(StubExtractor::ok(
                SourceId::Flyday,
                vec![listing(SourceId::Flyday, "https://flyday.hk/1", now)],
            ))],
            Duration::from_secs(5),
        );

        let err = orchestrator.run(now).await.unwrap_err();
        assert!(matches!(err, RunError::Persist(_)));
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert_eq!(store.checkpoint(), None);
    }

    #[tokio::test]
    async fn test_checkpoint_failure_is_reported() {
        let store = Arc::new(FailingStore::new(FailOn::Checkpoint));
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 23, 0, 0).unwrap();

        let orchestrator = ScrapeOrchestrator::new(
            store.clone(),
            vec![Arc::new(StubExtractor::ok(SourceId::Flyday, vec![]))],
            Duration::from_secs(5),
        );

        let err = orchestrator.run(now).await.unwrap_err();
        assert!(matches!(err, RunError::Checkpoint(_)));
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert_eq!(store.checkpoint(), None);
    }
}
