//! Shared HTML helpers for the extractors.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

use super::ExtractError;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub(super) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::Selector(css.to_string()))
}

/// Text content of an element with runs of whitespace collapsed.
pub(super) fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}

/// Resolve a possibly relative link against the page it was found on.
pub(super) fn resolve_link(page_url: &str, href: &str) -> String {
    let href = href.trim();
    match Url::parse(page_url).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

pub(super) fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
