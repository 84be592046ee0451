//! Single page fetch against a single instance: warm-up, pacing, the search
//! request itself, and anti-bot classification of the response.
//!
//! Several public instances reject or redirect search requests that arrive
//! without prior navigation, so every page fetch first visits the instance
//! root and pulls one of its stylesheet assets with a matching `Referer`,
//! the way a real browser session would.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use scraper::{Html, Selector};
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::config::SearchConfig;
use crate::fetcher::PageFetcher;
use crate::{Result, SearchError, SearchQuery};

/// Marker present in an instance's landing page but never in a result page.
/// A search response containing it means the instance bounced the request
/// back to its home page.
const LANDING_MARKER: &str = "index_endpoint";

/// Substring identifying the instance's own client stylesheet among the
/// `<link rel="stylesheet">` entries of the root page.
const ASSET_MARKER: &str = "searxng";

/// Bot-redirect retry state. The same instance is re-attempted exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Second,
}

/// Fetches one search result page from one instance.
pub struct PageLoader {
    fetcher: Arc<dyn PageFetcher>,
    request_delay_ms: (u64, u64),
    bot_retry_delay_ms: u64,
}

impl PageLoader {
    /// Creates a loader over the given fetcher, taking pacing parameters
    /// from the configuration.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &SearchConfig) -> Self {
        Self {
            fetcher,
            request_delay_ms: config.request_delay_ms,
            bot_retry_delay_ms: config.bot_retry_delay_ms,
        }
    }

    /// Fetches the HTML of one search result page.
    ///
    /// Performs the warm-up round trip, sleeps a jittered delay, then issues
    /// the search GET. A response that is really the instance's landing page
    /// triggers one same-instance retry after a longer pause; a second
    /// redirect is surfaced as [`SearchError::BotRedirect`].
    pub async fn load(&self, instance: &str, query: &SearchQuery, page: u32) -> Result<String> {
        self.warm_up(instance).await?;
        self.pace().await;

        let url = search_url(instance, query, page);
        let mut attempt = Attempt::First;

        loop {
            let html = self.fetcher.get(&url, Some(instance)).await?;

            if !html.contains(LANDING_MARKER) {
                return Ok(html);
            }

            match attempt {
                Attempt::First => {
                    warn!(
                        "Instance {} served its landing page instead of results, retrying once",
                        instance
                    );
                    sleep(Duration::from_millis(self.bot_retry_delay_ms)).await;
                    attempt = Attempt::Second;
                }
                Attempt::Second => {
                    return Err(SearchError::BotRedirect(instance.to_string()));
                }
            }
        }
    }

    /// Visits the instance root and fetches its client stylesheet.
    ///
    /// An unreachable root is a transport error for the whole page fetch;
    /// a failed or missing stylesheet is logged and ignored.
    async fn warm_up(&self, instance: &str) -> Result<()> {
        let root_html = self.fetcher.get(instance, None).await?;

        if let Some(asset_url) = stylesheet_url(&root_html, instance) {
            if let Err(e) = self.fetcher.get(&asset_url, Some(instance)).await {
                debug!("Warm-up asset fetch failed for {}: {}", instance, e);
            }
        } else {
            debug!("No client stylesheet found on {}", instance);
        }

        Ok(())
    }

    /// Sleeps a random delay within the configured range.
    async fn pace(&self) {
        let (min, max) = self.request_delay_ms;
        if max == 0 {
            return;
        }
        let delay = rand::thread_rng().gen_range(min..=max);
        sleep(Duration::from_millis(delay)).await;
    }
}

/// Builds the search URL for one instance/query/page combination.
///
/// `pageno` is omitted for the first page.
fn search_url(instance: &str, query: &SearchQuery, page: u32) -> String {
    let mut url = format!(
        "{}/search?q={}",
        instance,
        urlencoding::encode(&query.query)
    );
    if let Some(range) = query.time_range {
        url.push_str("&time_range=");
        url.push_str(range.as_param());
    }
    if let Some(language) = &query.language {
        url.push_str("&language=");
        url.push_str(&urlencoding::encode(language));
    }
    if page > 1 {
        url.push_str(&format!("&pageno={}", page));
    }
    url
}

/// Finds the instance's client stylesheet URL in the root page HTML.
fn stylesheet_url(html: &str, instance: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"link[rel="stylesheet"]"#).ok()?;

    for link in document.select(&selector) {
        if let Some(href) = link.value().attr("href") {
            if href.contains(ASSET_MARKER) {
                let base = Url::parse(&format!("{}/", instance)).ok()?;
                return base.join(href).ok().map(String::from);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimeRange;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    const ROOT_HTML: &str = r#"<html><head>
        <link rel="stylesheet" href="/static/themes/simple/css/searxng.min.css">
        </head><body class="index_endpoint"></body></html>"#;

    const RESULT_HTML: &str = r#"<html><body><article class="result">ok</article></body></html>"#;

    const LANDING_HTML: &str = r#"<html><body class="index_endpoint"></body></html>"#;

    /// Scripted fetcher: serves a fixed root page and stylesheet, pops search
    /// responses from a queue, and logs every call.
    struct ScriptedFetcher {
        search_responses: Mutex<VecDeque<Result<String>>>,
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl ScriptedFetcher {
        fn new(search_responses: Vec<Result<String>>) -> Self {
            Self {
                search_responses: Mutex::new(search_responses.into_iter().collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }

        fn search_calls(&self) -> Vec<(String, Option<String>)> {
            self.calls()
                .into_iter()
                .filter(|(url, _)| url.contains("/search?"))
                .collect()
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn get(&self, url: &str, referer: Option<&str>) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), referer.map(String::from)));

            if url.contains("/search?") {
                self.search_responses
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| Err(SearchError::Other("unexpected search call".into())))
            } else if url.ends_with(".css") {
                Ok(String::new())
            } else {
                Ok(ROOT_HTML.to_string())
            }
        }
    }

    fn quiet_config() -> SearchConfig {
        SearchConfig {
            request_delay_ms: (0, 0),
            bot_retry_delay_ms: 0,
            ..Default::default()
        }
    }

    fn loader(fetcher: Arc<ScriptedFetcher>) -> PageLoader {
        PageLoader::new(fetcher, &quiet_config())
    }

    #[tokio::test]
    async fn test_load_returns_result_html() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(RESULT_HTML.to_string())]));
        let loader = loader(Arc::clone(&fetcher));

        let query = SearchQuery::new("rust");
        let html = loader.load("https://inst.example", &query, 1).await.unwrap();
        assert_eq!(html, RESULT_HTML);
    }

    #[tokio::test]
    async fn test_load_performs_warm_up_before_search() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(RESULT_HTML.to_string())]));
        let loader = loader(Arc::clone(&fetcher));

        let query = SearchQuery::new("rust");
        loader.load("https://inst.example", &query, 1).await.unwrap();

        let calls = fetcher.calls();
        assert_eq!(calls.len(), 3);
        // Root visit, no referer.
        assert_eq!(calls[0].0, "https://inst.example");
        assert_eq!(calls[0].1, None);
        // Stylesheet with referer.
        assert!(calls[1].0.ends_with("searxng.min.css"));
        assert_eq!(calls[1].1.as_deref(), Some("https://inst.example"));
        // Search with referer.
        assert!(calls[2].0.starts_with("https://inst.example/search?q=rust"));
        assert_eq!(calls[2].1.as_deref(), Some("https://inst.example"));
    }

    #[tokio::test]
    async fn test_load_bot_redirect_retries_exactly_once_then_succeeds() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Ok(LANDING_HTML.to_string()),
            Ok(RESULT_HTML.to_string()),
        ]));
        let loader = loader(Arc::clone(&fetcher));

        let query = SearchQuery::new("rust");
        let html = loader.load("https://inst.example", &query, 1).await.unwrap();

        assert_eq!(html, RESULT_HTML);
        assert_eq!(fetcher.search_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_load_bot_redirect_twice_is_hard_failure() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Ok(LANDING_HTML.to_string()),
            Ok(LANDING_HTML.to_string()),
        ]));
        let loader = loader(Arc::clone(&fetcher));

        let query = SearchQuery::new("rust");
        let err = loader
            .load("https://inst.example", &query, 1)
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::BotRedirect(_)));
        // Exactly one same-instance retry, never a third attempt.
        assert_eq!(fetcher.search_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_load_search_transport_error_propagates() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Err(SearchError::Other(
            "connection reset".into(),
        ))]));
        let loader = loader(Arc::clone(&fetcher));

        let query = SearchQuery::new("rust");
        let result = loader.load("https://inst.example", &query, 1).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_warm_up_asset_failure_is_not_fatal() {
        /// Root page present, stylesheet GET fails, search succeeds.
        struct FlakyAssetFetcher;

        #[async_trait]
        impl PageFetcher for FlakyAssetFetcher {
            async fn get(&self, url: &str, _referer: Option<&str>) -> Result<String> {
                if url.ends_with(".css") {
                    Err(SearchError::Other("asset unavailable".into()))
                } else if url.contains("/search?") {
                    Ok(RESULT_HTML.to_string())
                } else {
                    Ok(ROOT_HTML.to_string())
                }
            }
        }

        let loader = PageLoader::new(Arc::new(FlakyAssetFetcher), &quiet_config());
        let query = SearchQuery::new("rust");
        let html = loader.load("https://inst.example", &query, 1).await.unwrap();
        assert_eq!(html, RESULT_HTML);
    }

    #[test]
    fn test_search_url_minimal() {
        let query = SearchQuery::new("rust programming");
        assert_eq!(
            search_url("https://inst.example", &query, 1),
            "https://inst.example/search?q=rust%20programming"
        );
    }

    #[test]
    fn test_search_url_page_one_omits_pageno() {
        let query = SearchQuery::new("rust");
        let url = search_url("https://inst.example", &query, 1);
        assert!(!url.contains("pageno"));
    }

    #[test]
    fn test_search_url_later_page_includes_pageno() {
        let query = SearchQuery::new("rust");
        let url = search_url("https://inst.example", &query, 3);
        assert!(url.ends_with("&pageno=3"));
    }

    #[test]
    fn test_search_url_with_filters() {
        let query = SearchQuery::new("rust")
            .with_time_range(TimeRange::Week)
            .with_language("en");
        let url = search_url("https://inst.example", &query, 2);
        assert_eq!(
            url,
            "https://inst.example/search?q=rust&time_range=week&language=en&pageno=2"
        );
    }

    #[test]
    fn test_stylesheet_url_relative_href() {
        let url = stylesheet_url(ROOT_HTML, "https://inst.example").unwrap();
        assert_eq!(
            url,
            "https://inst.example/static/themes/simple/css/searxng.min.css"
        );
    }

    #[test]
    fn test_stylesheet_url_absolute_href() {
        let html = r#"<link rel="stylesheet" href="https://cdn.example/searxng.min.css">"#;
        let url = stylesheet_url(html, "https://inst.example").unwrap();
        assert_eq!(url, "https://cdn.example/searxng.min.css");
    }

    #[test]
    fn test_stylesheet_url_ignores_unrelated_links() {
        let html = r#"<link rel="stylesheet" href="/css/bootstrap.min.css">"#;
        assert!(stylesheet_url(html, "https://inst.example").is_none());
    }

    #[test]
    fn test_stylesheet_url_missing() {
        assert!(stylesheet_url("<html></html>", "https://inst.example").is_none());
    }
}
