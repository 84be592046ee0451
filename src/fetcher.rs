//! Page fetcher abstraction for retrieving HTML content.

use async_trait::async_trait;

use crate::Result;

/// Trait for fetching the HTML content of a URL.
///
/// This is the raw HTTP seam: one GET, optionally with a `Referer` header,
/// returning the response body. Transport failures and non-2xx statuses are
/// errors. All other behaviour (warm-up, pacing, retry) lives above this
/// trait so tests and embedders can substitute fakes.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the given URL, sending `Referer` when provided.
    async fn get(&self, url: &str, referer: Option<&str>) -> Result<String>;
}
