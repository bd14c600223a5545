//! SQLite-backed [`ListingStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{
    DieselCheckpointRepository, DieselListingRepository, DieselSubscriberRepository,
    ListingStore, SqlitePool, StoreError,
};
use crate::models::{ListingRecord, Subscriber, SubscriberFilter};

/// Groups the per-table repositories behind one handle.
#[derive(Clone)]
pub struct DieselStore {
    pub listings: DieselListingRepository,
    pub checkpoints: DieselCheckpointRepository,
    pub subscribers: DieselSubscriberRepository,
}

impl DieselStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            listings: DieselListingRepository::new(pool.clone()),
            checkpoints: DieselCheckpointRepository::new(pool.clone()),
            subscribers: DieselSubscriberRepository::new(pool),
        }
    }
}

#[async_trait]
impl ListingStore for DieselStore {
    async fn find_checkpoint(&self, key: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.checkpoints.get(key).await?)
    }

    async fn upsert_checkpoint(&self, key: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        Ok(self.checkpoints.set(key, at).await?)
    }

    async fn bulk_insert(
        &self,
        records: &[ListingRecord],
    ) -> Result<Vec<ListingRecord>, StoreError> {
        Ok(self.listings.bulk_insert(records).await?)
    }

    async fn find_subscribers(
        &self,
        filter: SubscriberFilter,
    ) -> Result<Vec<Subscriber>, StoreError> {
        self.subscribers.find(filter).await
    }

    async fn prune_listings(&self, before: DateTime<Utc>) -> Result<usize, StoreError> {
        Ok(self.listings.delete_published_before(before).await?)
    }
}
