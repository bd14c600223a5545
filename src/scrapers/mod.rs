//! Listing extractors for the supported deal sites.

mod extract;
pub mod flyagain;
pub mod flyday;
mod http_client;

pub use flyagain::FlyAgainExtractor;
pub use flyday::FlydayExtractor;
pub use http_client::{resolve_user_agent, HttpClient, USER_AGENT};

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::ErrorKind;
use crate::models::{ListingRecord, SourceId};

/// Errors raised while fetching or parsing a listing page.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("request to {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("cannot parse date {value:?}: {reason}")]
    Date { value: String, reason: String },

    #[error("listing #{index} has no {field}")]
    MissingField { field: &'static str, index: usize },

    #[error("invalid selector {0:?}")]
    Selector(String),
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch { .. } | Self::Status { .. } | Self::Timeout(_) => ErrorKind::Transient,
            Self::Date { .. } | Self::MissingField { .. } | Self::Selector(_) => {
                ErrorKind::Structural
            }
        }
    }
}

/// Something that can return the HTML of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ExtractError>;
}

/// One deal site.
#[async_trait]
pub trait SourceExtractor: Send + Sync {
    fn source_id(&self) -> SourceId;

    /// Fetch the listing page and return the tagged listings published
    /// strictly after `watermark`.
    async fn extract(
        &self,
        watermark: Option<DateTime<Utc>>,
    ) -> Result<Vec<ListingRecord>, ExtractError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use super::*;

    /// Serves canned pages keyed by URL.
    #[derive(Default)]
    pub struct FixtureFetcher {
        pages: HashMap<String, String>,
    }

    impl FixtureFetcher {
        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }
    }

    #[async_trait]
    impl PageFetcher for FixtureFetcher {
        async fn fetch(&self, url: &str) -> Result<String, ExtractError> {
            self.pages.get(url).cloned().ok_or_else(|| ExtractError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }
}
