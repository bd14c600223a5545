//! farewatch - flight deal aggregation and alerting.
//!
//! Scrapes promotion listings from travel deal sites, tags them with the
//! destinations and airlines they mention, stores new listings and alerts
//! subscribers whose interests match.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod migrations;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod repository;
pub mod schema;
pub mod scrapers;
pub mod tagger;
