//! Result extraction from search result pages.
//!
//! The known result-block markup is matched with regular expressions over
//! class-attribute markers rather than a structural parse. The pattern
//! matching is confined to this module behind [`Extractor`]; callers only
//! see `HTML in, results out`.

use regex::Regex;
use tracing::warn;

use crate::SearchResult;

/// Placeholder summary for result blocks that carry no snippet.
pub const NO_SUMMARY: &str = "No summary available";

/// Documents larger than this that yield zero blocks are logged as a parse
/// anomaly (markup conventions probably changed).
const PARSE_ANOMALY_THRESHOLD: usize = 1024;

/// Extracts `(url, summary)` records from result-page HTML.
///
/// Extraction never fails; unparseable input yields an empty list.
pub struct Extractor {
    block: Regex,
    title_link: Regex,
    href: Regex,
    snippet: Regex,
    tag: Regex,
}

impl Extractor {
    /// Creates an extractor with the compiled markup patterns.
    pub fn new() -> Self {
        Self {
            // A result block is an <article> or <div> whose class attribute
            // contains the word "result", up to the nearest closing tag of
            // the same element type.
            block: Regex::new(
                r#"(?is)<article\b[^>]*class="[^"]*\bresult\b[^"]*".*?</article\s*>|<div\b[^>]*class="[^"]*\bresult\b[^"]*".*?</div\s*>"#,
            )
            .expect("valid regex"),
            title_link: Regex::new(r#"(?is)<a\b[^>]*class="[^"]*\burl_header\b[^"]*"[^>]*>"#)
                .expect("valid regex"),
            href: Regex::new(r#"(?i)href\s*=\s*"([^"]*)""#).expect("valid regex"),
            snippet: Regex::new(r#"(?is)<p\b[^>]*class="[^"]*\bcontent\b[^"]*"[^>]*>(.*?)</p\s*>"#)
                .expect("valid regex"),
            tag: Regex::new(r"(?s)<[^>]*>").expect("valid regex"),
        }
    }

    /// Extracts results from one HTML document, in document order.
    ///
    /// A block without a title link URL is skipped; a block without a
    /// snippet keeps its URL with [`NO_SUMMARY`] as the summary.
    pub fn extract(&self, html: &str) -> Vec<SearchResult> {
        let mut results = Vec::new();
        let mut blocks = 0usize;

        for block_match in self.block.find_iter(html) {
            blocks += 1;
            let block = block_match.as_str();

            let link_tag = match self.title_link.find(block) {
                Some(m) => m.as_str(),
                None => continue,
            };
            let url = match self.href.captures(link_tag).and_then(|c| c.get(1)) {
                Some(href) => href.as_str().trim().to_string(),
                None => continue,
            };
            if url.is_empty() {
                continue;
            }

            let summary = self
                .snippet
                .captures(block)
                .and_then(|c| c.get(1))
                .map(|m| self.tag.replace_all(m.as_str(), "").trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NO_SUMMARY.to_string());

            results.push(SearchResult::new(url, summary));
        }

        if blocks == 0 && html.len() > PARSE_ANOMALY_THRESHOLD {
            warn!(
                "No result blocks found in {} bytes of HTML; markup conventions may have changed",
                html.len()
            );
        }

        results
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
