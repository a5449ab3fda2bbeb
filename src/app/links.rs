//! Anchor extraction from directory listings
//!
//! Both the index page and the per-architecture folder pages are plain
//! directory listings; everything the crawl needs is in the `href` of their
//! anchors.

use scraper::{Html, Selector};
use tracing::error;

use crate::constants::selectors;

/// Extract every anchor `href` from an HTML document in document order
///
/// Anchors without an `href` are kept as `None` so callers see the same
/// sequence the page contains and decide for themselves how to skip them.
/// The HTML parser recovers from malformed markup, so a broken document
/// yields whatever anchors could be recovered, possibly none.
pub fn extract_links(html: &str) -> Vec<Option<String>> {
    let selector = match Selector::parse(selectors::ANCHOR_SELECTOR) {
        Ok(selector) => selector,
        Err(e) => {
            error!(
                "Invalid CSS selector '{}': {:?}",
                selectors::ANCHOR_SELECTOR,
                e
            );
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .map(|element| element.value().attr("href").map(str::to_string))
        .collect()
}
