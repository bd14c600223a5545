//! Repository layer for database persistence.
//!
//! All database access uses Diesel on SQLite through diesel-async's
//! `SyncConnectionWrapper`. The pipeline only sees the [`ListingStore`] trait.

pub mod checkpoint;
pub mod listing;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod store;
pub mod subscriber;
pub mod util;

pub use checkpoint::DieselCheckpointRepository;
pub use listing::{DieselListingRepository, ListingQuery};
pub use migrations::run_migrations;
pub use pool::{DbError, SqlitePool};
pub use store::DieselStore;
pub use subscriber::DieselSubscriberRepository;

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{ListingRecord, Subscriber, SubscriberFilter};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbError),

    #[error("corrupt {column} value {value:?}")]
    Corrupt { column: &'static str, value: String },
}

/// Storage operations the scrape and notify stages depend on.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Stored checkpoint timestamp for `key`, if any.
    async fn find_checkpoint(&self, key: &str) -> Result<Option<DateTime<Utc>>, StoreError>;

    async fn upsert_checkpoint(&self, key: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Persist listings, returning the ones that were not already stored.
    async fn bulk_insert(
        &self,
        records: &[ListingRecord],
    ) -> Result<Vec<ListingRecord>, StoreError>;

    async fn find_subscribers(
        &self,
        filter: SubscriberFilter,
    ) -> Result<Vec<Subscriber>, StoreError>;

    /// Delete listings published before `before`.
    async fn prune_listings(&self, before: DateTime<Utc>) -> Result<usize, StoreError>;
}

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Parse an optional datetime string from the database.
pub fn parse_datetime_opt(s: Option<String>) -> Option<DateTime<Utc>> {
    s.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}

/// Encode a string set as a JSON array column.
pub(crate) fn encode_set(values: &BTreeSet<String>) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_set(
    column: &'static str,
    raw: &str,
) -> Result<BTreeSet<String>, StoreError> {
    serde_json::from_str(raw).map_err(|_| StoreError::Corrupt {
        column,
        value: raw.to_string(),
    })
}
