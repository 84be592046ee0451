//! HTTP-based page fetcher using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::REFERER;
use reqwest::Client;

use crate::fetcher::PageFetcher;
use crate::Result;

/// Fixed, versioned user-agent sent with every request.
pub const USER_AGENT: &str = concat!("searx-client/", env!("CARGO_PKG_VERSION"));

/// A page fetcher that uses plain HTTP requests via reqwest.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a new `HttpFetcher` with default settings.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }

    /// Creates a new `HttpFetcher` with the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Creates an `HttpFetcher` with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn get(&self, url: &str, referer: Option<&str>) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(html)
    }
}
