//! Diesel-based checkpoint repository.
//!
//! Checkpoints are small keyed timestamps; the scraper watermark is the only
//! one in use today.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::CheckpointRow;
use super::parse_datetime_opt;
use super::pool::{DbError, SqlitePool};
use crate::schema::checkpoints;

#[derive(Clone)]
pub struct DieselCheckpointRepository {
    pool: SqlitePool,
}

impl DieselCheckpointRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the timestamp stored under `key`.
    ///
    /// An unparseable stored value is treated as missing.
    pub async fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>, DbError> {
        let mut conn = self.pool.get().await?;

        checkpoints::table
            .find(key)
            .select(CheckpointRow::as_select())
            .first::<CheckpointRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.and_then(|r| parse_datetime_opt(Some(r.last_updated))))
    }

    /// Insert or replace the timestamp stored under `key`.
    pub async fn set(&self, key: &str, at: DateTime<Utc>) -> Result<(), DbError> {
        let mut conn = self.pool.get().await?;
        let last_updated = at.to_rfc3339();

        // Use replace_into for SQLite upsert
        diesel::replace_into(checkpoints::table)
            .values((
                checkpoints::key.eq(key),
                checkpoints::last_updated.eq(&last_updated),
            ))
            .execute(&mut conn)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WATERMARK_KEY;
    use crate::repository::testing::setup_test_db;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_missing_checkpoint() {
        let (pool, _dir) = setup_test_db().await;
        let repo = DieselCheckpointRepository::new(pool);
        assert_eq!(repo.get(WATERMARK_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let (pool, _dir) = setup_test_db().await;
        let repo = DieselCheckpointRepository::new(pool);

        let first = Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 3, 2, 23, 0, 0).unwrap();

        repo.set(WATERMARK_KEY, first).await.unwrap();
        assert_eq!(repo.get(WATERMARK_KEY).await.unwrap(), Some(first));

        repo.set(WATERMARK_KEY, second).await.unwrap();
        assert_eq!(repo.get(WATERMARK_KEY).await.unwrap(), Some(second));
        assert_eq!(repo.get("other").await.unwrap(), None);
    }
}
