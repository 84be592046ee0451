//! # searx-client
//!
//! A resilient scraping client for public SearXNG-style meta-search
//! instances.
//!
//! Public instances are individually flaky: they rate-limit, bounce
//! automated traffic back to their landing page, or go away entirely. This
//! library masks that by rotating one query across a shuffled pool of
//! instances with browser-like warm-up and pacing, bounded retries, and an
//! optional multi-page multi-server "detailed" mode that merges and
//! deduplicates results.
//!
//! ## Example
//!
//! ```rust,no_run
//! use searx_client::{Search, SearchConfig, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let search = Search::new(SearchConfig::from_env());
//!
//!     let query = SearchQuery::new("rust programming");
//!     let results = search.search(&query).await?;
//!
//!     for result in &results {
//!         println!("{}: {}", result.url, result.summary);
//!     }
//!     Ok(())
//! }
//! ```

mod aggregator;
mod config;
mod error;
mod extract;
mod fetcher;
mod fetcher_http;
mod page;
mod pool;
mod query;
mod result;
mod search;

pub use aggregator::Aggregator;
pub use config::{SearchConfig, INSTANCES_ENV, LANGUAGE_ENV};
pub use error::{Result, SearchError};
pub use extract::{Extractor, NO_SUMMARY};
pub use fetcher::PageFetcher;
pub use fetcher_http::HttpFetcher;
pub use page::PageLoader;
pub use pool::InstancePool;
pub use query::{SearchQuery, TimeRange};
pub use result::SearchResult;
pub use search::Search;
