//! Extractor for the flyday.hk ticket promotions category page.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::Html;
use tracing::debug;

use super::extract::{element_text, non_empty, resolve_link, selector};
use super::{ExtractError, PageFetcher, SourceExtractor};
use crate::models::{ListingRecord, SourceId};
use crate::tagger::{Tagger, Tags};

pub const DEFAULT_URL: &str =
    "https://flyday.hk/category/%e6%a9%9f%e7%a5%a8%e5%84%aa%e6%83%a0-tickets-promotions/";

const ITEM: &str = "article.item";
const TITLE_LINK: &str = ".penci-entry-title > a";
const PUBLISHED: &str = "time.published";
const SUMMARY: &str = ".item-content > p";
const CATEGORY: &str = ".cat > a";

pub struct FlydayExtractor {
    fetcher: Arc<dyn PageFetcher>,
    tagger: Tagger,
    url: String,
}

impl FlydayExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, tagger: Tagger, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            tagger,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SourceExtractor for FlydayExtractor {
    fn source_id(&self) -> SourceId {
        SourceId::Flyday
    }

    async fn extract(
        &self,
        watermark: Option<DateTime<Utc>>,
    ) -> Result<Vec<ListingRecord>, ExtractError> {
        let html = self.fetcher.fetch(&self.url).await?;
        let listings = parse_listings(&html, &self.url, &self.tagger, Utc::now())?;
        let total = listings.len();

        let fresh: Vec<ListingRecord> = listings
            .into_iter()
            .filter(|l| l.is_newer_than(watermark))
            .collect();
        debug!(source = "flyday", total, fresh = fresh.len(), "Parsed listing page");
        Ok(fresh)
    }
}

/// Parse every listing block on the page.
///
/// A block without a title, link or parseable date means the page layout
/// changed, so the whole page is rejected.
pub fn parse_listings(
    html: &str,
    page_url: &str,
    tagger: &Tagger,
    ingested_at: DateTime<Utc>,
) -> Result<Vec<ListingRecord>, ExtractError> {
    let item_sel = selector(ITEM)?;
    let title_sel = selector(TITLE_LINK)?;
    let published_sel = selector(PUBLISHED)?;
    let summary_sel = selector(SUMMARY)?;
    let category_sel = selector(CATEGORY)?;

    let document = Html::parse_document(html);
    let mut listings = Vec::new();

    for (index, item) in document.select(&item_sel).enumerate() {
        let title_link = item
            .select(&title_sel)
            .next()
            .ok_or(ExtractError::MissingField {
                field: "title",
                index,
            })?;
        let title = element_text(title_link);
        if title.is_empty() {
            return Err(ExtractError::MissingField {
                field: "title",
                index,
            });
        }

        let href = title_link
            .value()
            .attr("href")
            .and_then(non_empty)
            .ok_or(ExtractError::MissingField {
                field: "link",
                index,
            })?;

        let raw_date = item
            .select(&published_sel)
            .next()
            .and_then(|t| t.value().attr("datetime"))
            .and_then(non_empty)
            .ok_or(ExtractError::MissingField {
                field: "date",
                index,
            })?;
        let published_at = DateTime::parse_from_rfc3339(raw_date)
            .map_err(|e| ExtractError::Date {
                value: raw_date.to_string(),
                reason: e.to_string(),
            })?
            .with_timezone(&Utc);

        let summary = item
            .select(&summary_sel)
            .map(element_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let categories: Vec<String> = item.select(&category_sel).map(element_text).collect();

        let Tags {
            mut destinations,
            mut airlines,
        } = tagger.tag(&[&title]);
        for category in &categories {
            destinations.extend(tagger.destinations_in(&[category.as_str()]));
        }
        airlines.extend(tagger.airlines_in(&[&summary]));

        listings.push(ListingRecord {
            title,
            summary,
            destinations,
            airlines,
            url: resolve_link(page_url, href),
            published_at,
            source: SourceId::Flyday,
            ingested_at,
        });
    }

    Ok(listings)
}
