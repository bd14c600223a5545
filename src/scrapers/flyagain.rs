//! Extractor for the flyagain.la front page.
//!
//! FlyAgain posts describe each deal in labelled paragraphs, e.g.
//! `<p><span>航點：</span>東京、大阪</p>`. Only the labelled fields feed the
//! tagger; free text elsewhere in the body is ignored.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use scraper::Html;
use tracing::debug;

use super::extract::{element_text, non_empty, resolve_link, selector};
use super::{ExtractError, PageFetcher, SourceExtractor};
use crate::models::{ListingRecord, SourceId};
use crate::tagger::{Tagger, Tags};

pub const DEFAULT_URL: &str = "https://flyagain.la/";

const BLOCK: &str = "div.blogpostcategory";
const TITLE_LINK: &str = "h2.title > a";
const PUBLISHED: &str = "a.post-meta-time";
const PARAGRAPH: &str = "div.blogcontent > p";
const PARAGRAPH_LABEL: &str = "span";
const CATEGORY: &str = "div.post-meta > div > a";

/// Post dates look like `March 2, 2024`.
const DATE_FORMAT: &str = "%B %d, %Y";

const LABEL_DESTINATIONS: &str = "航點";
const LABEL_AIRLINES: &str = "航空公司";
const LABEL_SUMMARY: &str = "結論";

pub struct FlyAgainExtractor {
    fetcher: Arc<dyn PageFetcher>,
    tagger: Tagger,
    url: String,
}

impl FlyAgainExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, tagger: Tagger, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            tagger,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SourceExtractor for FlyAgainExtractor {
    fn source_id(&self) -> SourceId {
        SourceId::FlyAgain
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
        debug!(source = "flyagain", total, fresh = fresh.len(), "Parsed listing page");
        Ok(fresh)
    }
}

/// Parse a `January 2, 2006` style date as midnight UTC.
///
/// The site publishes in Hong Kong time but only shows the day, so a post can
/// land up to eight hours later than its real publish time. With an evening
/// run time the same post passes two consecutive watermarks; the store skips
/// the second copy.
pub fn parse_post_date(text: &str) -> Result<DateTime<Utc>, ExtractError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| ExtractError::Date {
            value: text.to_string(),
            reason: e.to_string(),
        })
}

pub fn parse_listings(
    html: &str,
    page_url: &str,
    tagger: &Tagger,
    ingested_at: DateTime<Utc>,
) -> Result<Vec<ListingRecord>, ExtractError> {
    let block_sel = selector(BLOCK)?;
    let title_sel = selector(TITLE_LINK)?;
    let published_sel = selector(PUBLISHED)?;
    let paragraph_sel = selector(PARAGRAPH)?;
    let label_sel = selector(PARAGRAPH_LABEL)?;
    let category_sel = selector(CATEGORY)?;

    let document = Html::parse_document(html);
    let mut listings = Vec::new();

    for (index, block) in document.select(&block_sel).enumerate() {
        let title_link = block
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

        let href = block
            .value()
            .attr("this_url")
            .and_then(non_empty)
            .or_else(|| title_link.value().attr("href").and_then(non_empty))
            .ok_or(ExtractError::MissingField {
                field: "link",
                index,
            })?;

        let date_text = block
            .select(&published_sel)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .ok_or(ExtractError::MissingField {
                field: "date",
                index,
            })?;
        let published_at = parse_post_date(&date_text)?;

        let Tags {
            mut destinations,
            mut airlines,
        } = tagger.tag(&[&title]);
        let mut summary = String::new();

        for paragraph in block.select(&paragraph_sel) {
            let label: String = paragraph.select(&label_sel).map(element_text).collect();
            let text = element_text(paragraph);

            if label.contains(LABEL_DESTINATIONS) {
                destinations.extend(tagger.destinations_in(&[&text]));
            } else if label.contains(LABEL_AIRLINES) {
                airlines.extend(tagger.airlines_in(&[&text]));
            }
            if label.contains(LABEL_SUMMARY) {
                airlines.extend(tagger.airlines_in(&[&text]));
                summary = text;
            }
        }

        for category in block.select(&category_sel).map(element_text) {
            destinations.extend(tagger.destinations_in(&[category.as_str()]));
        }

        listings.push(ListingRecord {
            title,
            summary,
            destinations,
            airlines,
            url: resolve_link(page_url, href),
            published_at,
            source: SourceId::FlyAgain,
            ingested_at,
        });
    }

    Ok(listings)
}
