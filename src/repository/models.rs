//! Diesel ORM models for database tables.

use diesel::prelude::*;

use crate::schema;

/// Listing record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ListingRow {
    pub id: i32,
    pub source: String,
    pub title: String,
    pub summary: String,
    pub destinations: String,
    pub airlines: String,
    pub url: String,
    pub published_at: String,
    pub ingested_at: String,
}

/// New listing for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::listings)]
pub struct NewListing {
    pub source: String,
    pub title: String,
    pub summary: String,
    pub destinations: String,
    pub airlines: String,
    pub url: String,
    pub published_at: String,
    pub ingested_at: String,
}

/// Checkpoint record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::checkpoints)]
#[diesel(primary_key(key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CheckpointRow {
    pub key: String,
    pub last_updated: String,
}

/// Subscriber record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::subscribers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubscriberRow {
    pub id: String,
    pub email: String,
    pub notification: String,
    pub destinations: String,
    pub airlines: String,
    pub chat_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Subscriber for insertion or replacement.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::subscribers)]
pub struct NewSubscriber<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub notification: &'a str,
    pub destinations: String,
    pub airlines: String,
    pub chat_id: Option<&'a str>,
    pub created_at: String,
    pub updated_at: String,
}
