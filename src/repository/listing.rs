//! Diesel-based listing repository.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::models::{ListingRow, NewListing};
use super::pool::{DbError, SqlitePool};
use super::{decode_set, encode_set, parse_datetime, StoreError};
use crate::models::{ListingRecord, SourceId};
use crate::schema::listings;

impl TryFrom<ListingRow> for ListingRecord {
    type Error = StoreError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let source = SourceId::from_str(&row.source).ok_or_else(|| StoreError::Corrupt {
            column: "source",
            value: row.source.clone(),
        })?;

        Ok(ListingRecord {
            destinations: decode_set("destinations", &row.destinations)?,
            airlines: decode_set("airlines", &row.airlines)?,
            title: row.title,
            summary: row.summary,
            url: row.url,
            published_at: parse_datetime(&row.published_at),
            source,
            ingested_at: parse_datetime(&row.ingested_at),
        })
    }
}

impl From<&ListingRecord> for NewListing {
    fn from(record: &ListingRecord) -> Self {
        NewListing {
            source: record.source.as_str().to_string(),
            title: record.title.clone(),
            summary: record.summary.clone(),
            destinations: encode_set(&record.destinations),
            airlines: encode_set(&record.airlines),
            url: record.url.clone(),
            published_at: record.published_at.to_rfc3339(),
            ingested_at: record.ingested_at.to_rfc3339(),
        }
    }
}

/// Filter for stored listing lookups.
///
/// Empty sets match everything; otherwise a listing must share at least one
/// value with each non-empty set.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub destinations: BTreeSet<String>,
    pub airlines: BTreeSet<String>,
    pub source: Option<SourceId>,
    pub limit: Option<usize>,
}

impl ListingQuery {
    pub fn accepts(&self, record: &ListingRecord) -> bool {
        let destination_ok = self.destinations.is_empty()
            || !self.destinations.is_disjoint(&record.destinations);
        let airline_ok =
            self.airlines.is_empty() || !self.airlines.is_disjoint(&record.airlines);
        let source_ok = self.source.map_or(true, |s| s == record.source);
        destination_ok && airline_ok && source_ok
    }
}

/// Diesel-based listing repository.
#[derive(Clone)]
pub struct DieselListingRepository {
    pool: SqlitePool,
}

impl DieselListingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert listings in one transaction, returning the ones actually written.
    ///
    /// Rows that collide on `(source, url)` with a stored listing, or with an
    /// earlier record in the same batch, are skipped and left out of the result.
    pub async fn bulk_insert(
        &self,
        records: &[ListingRecord],
    ) -> Result<Vec<ListingRecord>, DbError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<NewListing> = records.iter().map(NewListing::from).collect();
        let mut conn = self.pool.get().await?;

        let written = conn
            .transaction(|conn| {
                Box::pin(async move {
                    // SQLite doesn't support batch insert_or_ignore, insert one at a time
                    let mut written = Vec::new();
                    for (index, row) in rows.iter().enumerate() {
                        let affected = diesel::insert_or_ignore_into(listings::table)
                            .values(row)
                            .execute(conn)
                            .await?;
                        if affected > 0 {
                            written.push(index);
                        }
                    }
                    Ok::<_, DbError>(written)
                })
            })
            .await?;

        Ok(written.into_iter().map(|i| records[i].clone()).collect())
    }

    /// Stored listings, newest first, filtered by `query`.
    pub async fn recent(&self, query: &ListingQuery) -> Result<Vec<ListingRecord>, StoreError> {
        let mut conn = self.pool.get().await?;

        let rows = listings::table
            .select(ListingRow::as_select())
            .order((listings::published_at.desc(), listings::id.desc()))
            .load::<ListingRow>(&mut conn)
            .await?;

        let limit = query.limit.unwrap_or(usize::MAX);
        let mut records = Vec::new();
        for row in rows {
            if records.len() >= limit {
                break;
            }
            let record = ListingRecord::try_from(row)?;
            if query.accepts(&record) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Total number of stored listings.
    pub async fn count(&self) -> Result<i64, DbError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        listings::table.select(count_star()).first(&mut conn).await
    }

    /// Delete listings published before `before`.
    pub async fn delete_published_before(&self, before: DateTime<Utc>) -> Result<usize, DbError> {
        let mut conn = self.pool.get().await?;
        let cutoff = before.to_rfc3339();

        diesel::delete(listings::table.filter(listings::published_at.lt(&cutoff)))
            .execute(&mut conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing::setup_test_db;
    use chrono::{Duration, TimeZone};

    fn listing(url: &str, published_at: DateTime<Utc>, destinations: &[&str]) -> ListingRecord {
        ListingRecord {
            title: format!("deal {url}"),
            summary: String::new(),
            destinations: destinations.iter().map(|s| s.to_string()).collect(),
            airlines: ["國泰航空".to_string()].into_iter().collect(),
            url: url.to_string(),
            published_at,
            source: SourceId::Flyday,
            ingested_at: published_at,
        }
    }

    fn march(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_bulk_insert_and_read_back() {
        let (pool, _dir) = setup_test_db().await;
        let repo = DieselListingRepository::new(pool);

        let records = vec![
            listing("https://flyday.hk/a", march(1), &["日本"]),
            listing("https://flyday.hk/b", march(2), &["韓國"]),
        ];
        assert_eq!(repo.bulk_insert(&records).await.unwrap(), records);
        assert_eq!(repo.count().await.unwrap(), 2);

        let stored = repo.recent(&ListingQuery::default()).await.unwrap();
        assert_eq!(stored.len(), 2);
        // newest first
        assert_eq!(stored[0], records[1]);
        assert_eq!(stored[1], records[0]);
    }

    #[tokio::test]
    async fn test_bulk_insert_empty_is_noop() {
        let (pool, _dir) = setup_test_db().await;
        let repo = DieselListingRepository::new(pool);
        assert!(repo.bulk_insert(&[]).await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_url_is_skipped() {
        let (pool, _dir) = setup_test_db().await;
        let repo = DieselListingRepository::new(pool);

        let record = listing("https://flyday.hk/a", march(1), &["日本"]);
        repo.bulk_insert(std::slice::from_ref(&record)).await.unwrap();
        assert!(repo.bulk_insert(&[record]).await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_bulk_insert_returns_only_new_rows() {
        let (pool, _dir) = setup_test_db().await;
        let repo = DieselListingRepository::new(pool);

        let stored = listing("https://flyday.hk/a", march(1), &["日本"]);
        repo.bulk_insert(std::slice::from_ref(&stored)).await.unwrap();

        let fresh = listing("https://flyday.hk/b", march(2), &["韓國"]);
        let written = repo
            .bulk_insert(&[stored.clone(), fresh.clone(), fresh.clone()])
            .await
            .unwrap();
        assert_eq!(written, vec![fresh]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_recent_filters_and_limits() {
        let (pool, _dir) = setup_test_db().await;
        let repo = DieselListingRepository::new(pool);

        repo.bulk_insert(&[
            listing("https://flyday.hk/a", march(1), &["日本"]),
            listing("https://flyday.hk/b", march(2), &["韓國"]),
            listing("https://flyday.hk/c", march(3), &["日本", "韓國"]),
        ])
        .await
        .unwrap();

        let query = ListingQuery {
            destinations: ["日本".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let japan = repo.recent(&query).await.unwrap();
        let urls: Vec<&str> = japan.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://flyday.hk/c", "https://flyday.hk/a"]);

        let limited = repo
            .recent(&ListingQuery {
                limit: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].url, "https://flyday.hk/c");
    }

    #[tokio::test]
    async fn test_delete_published_before() {
        let (pool, _dir) = setup_test_db().await;
        let repo = DieselListingRepository::new(pool);

        repo.bulk_insert(&[
            listing("https://flyday.hk/old", march(1) - Duration::days(120), &[]),
            listing("https://flyday.hk/new", march(1), &[]),
        ])
        .await
        .unwrap();

        let deleted = repo
            .delete_published_before(march(1) - Duration::days(90))
            .await
            .unwrap();
        assert_eq!(deleted, 1);

        let left = repo.recent(&ListingQuery::default()).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].url, "https://flyday.hk/new");
    }
}
