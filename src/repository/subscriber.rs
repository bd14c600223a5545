//! Diesel-based subscriber repository.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use super::models::{NewSubscriber, SubscriberRow};
use super::pool::SqlitePool;
use super::{decode_set, encode_set, parse_datetime, StoreError};
use crate::models::{NotificationMode, Subscriber, SubscriberFilter};
use crate::schema::subscribers;

impl TryFrom<SubscriberRow> for Subscriber {
    type Error = StoreError;

    fn try_from(row: SubscriberRow) -> Result<Self, Self::Error> {
        let notification =
            NotificationMode::from_str(&row.notification).ok_or_else(|| StoreError::Corrupt {
                column: "notification",
                value: row.notification.clone(),
            })?;

        Ok(Subscriber {
            destinations: decode_set("destinations", &row.destinations)?,
            airlines: decode_set("airlines", &row.airlines)?,
            id: row.id,
            email: row.email,
            notification,
            chat_id: row.chat_id,
            created_at: parse_datetime(&row.created_at),
            updated_at: parse_datetime(&row.updated_at),
        })
    }
}

#[derive(Clone)]
pub struct DieselSubscriberRepository {
    pool: SqlitePool,
}

impl DieselSubscriberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Subscribers accepted by `filter`, oldest first.
    ///
    /// Rows that fail to decode are logged and left out.
    pub async fn find(&self, filter: SubscriberFilter) -> Result<Vec<Subscriber>, StoreError> {
        let mut conn = self.pool.get().await?;

        let mut query = subscribers::table
            .select(SubscriberRow::as_select())
            .order(subscribers::created_at.asc())
            .into_boxed();
        if let Some(mode) = filter.notification {
            query = query.filter(subscribers::notification.eq(mode.as_str()));
        }

        let rows = query.load::<SubscriberRow>(&mut conn).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                match Subscriber::try_from(row) {
                    Ok(subscriber) => Some(subscriber),
                    Err(e) => {
                        warn!(subscriber = %id, error = %e, "Skipping corrupt subscriber row");
                        None
                    }
                }
            })
            .collect())
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError> {
        let mut conn = self.pool.get().await?;

        let row = subscribers::table
            .filter(subscribers::email.eq(email))
            .select(SubscriberRow::as_select())
            .first::<SubscriberRow>(&mut conn)
            .await
            .optional()?;
        row.map(Subscriber::try_from).transpose()
    }

    /// Save a subscriber (insert or replace by id).
    pub async fn save(&self, subscriber: &Subscriber) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;

        let row = NewSubscriber {
            id: &subscriber.id,
            email: &subscriber.email,
            notification: subscriber.notification.as_str(),
            destinations: encode_set(&subscriber.destinations),
            airlines: encode_set(&subscriber.airlines),
            chat_id: subscriber.chat_id.as_deref(),
            created_at: subscriber.created_at.to_rfc3339(),
            updated_at: Utc::now().to_rfc3339(),
        };

        // Use replace_into for SQLite upsert
        diesel::replace_into(subscribers::table)
            .values(&row)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Delete a subscriber by id or email.
    pub async fn delete(&self, id_or_email: &str) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(
            subscribers::table.filter(
                subscribers::id
                    .eq(id_or_email)
                    .or(subscribers::email.eq(id_or_email)),
            ),
        )
        .execute(&mut conn)
        .await?;

        Ok(rows > 0)
    }
}
