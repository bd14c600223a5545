//! Listing models for scraped flight deal posts.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Checkpoint key under which the scraper watermark is stored.
pub const WATERMARK_KEY: &str = "scraper";

/// Site a listing was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    Flyday,
    FlyAgain,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flyday => "flyday",
            Self::FlyAgain => "flyagain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "flyday" => Some(Self::Flyday),
            "flyagain" => Some(Self::FlyAgain),
            _ => None,
        }
    }

    pub fn all() -> [SourceId; 2] {
        [Self::Flyday, Self::FlyAgain]
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single deal listing extracted from a source page.
///
/// `destinations` and `airlines` only ever hold canonical dictionary values;
/// the set type removes duplicates picked up from different fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    pub summary: String,
    pub destinations: BTreeSet<String>,
    pub airlines: BTreeSet<String>,
    /// Link to the listing's detail page.
    pub url: String,
    /// Publication time reported by the source.
    pub published_at: DateTime<Utc>,
    pub source: SourceId,
    /// When we scraped it.
    pub ingested_at: DateTime<Utc>,
}

impl ListingRecord {
    /// Whether this listing was published strictly after the watermark.
    ///
    /// A missing watermark means nothing has been seen yet.
    pub fn is_newer_than(&self, watermark: Option<DateTime<Utc>>) -> bool {
        watermark.map_or(true, |w| self.published_at > w)
    }
}

/// Scraper checkpoint: listings published at or before `at` were already seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermark {
    pub at: DateTime<Utc>,
}

impl Watermark {
    /// Next watermark for a run that started at `run_started`.
    ///
    /// Never moves backwards, even if the wall clock does.
    pub fn advance(previous: Option<DateTime<Utc>>, run_started: DateTime<Utc>) -> Self {
        let at = match previous {
            Some(prev) if prev > run_started => prev,
            _ => run_started,
        };
        Self { at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn listing_at(published_at: DateTime<Utc>) -> ListingRecord {
        ListingRecord {
            title: "東京機票優惠".to_string(),
            summary: String::new(),
            destinations: BTreeSet::new(),
            airlines: BTreeSet::new(),
            url: "https://flyday.hk/tokyo".to_string(),
            published_at,
            source: SourceId::Flyday,
            ingested_at: published_at,
        }
    }

    #[test]
    fn test_source_id_roundtrip() {
        for id in SourceId::all() {
            assert_eq!(SourceId::from_str(id.as_str()), Some(id));
        }
        assert_eq!(SourceId::from_str("colly"), None);
    }

    #[test]
    fn test_equal_to_watermark_is_not_newer() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let listing = listing_at(at);
        assert!(!listing.is_newer_than(Some(at)));
        assert!(listing.is_newer_than(Some(at - Duration::seconds(1))));
        assert!(!listing.is_newer_than(Some(at + Duration::seconds(1))));
        assert!(listing.is_newer_than(None));
    }

    #[test]
    fn test_watermark_never_moves_backwards() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let later = earlier + Duration::days(1);

        assert_eq!(Watermark::advance(None, earlier).at, earlier);
        assert_eq!(Watermark::advance(Some(earlier), later).at, later);
        assert_eq!(Watermark::advance(Some(later), earlier).at, later);
    }
}
