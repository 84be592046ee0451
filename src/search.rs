//! Search orchestration: retry/fallback across instances, and the
//! multi-page multi-server detailed mode.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::aggregator::Aggregator;
use crate::config::SearchConfig;
use crate::extract::Extractor;
use crate::fetcher::PageFetcher;
use crate::fetcher_http::HttpFetcher;
use crate::page::PageLoader;
use crate::pool::InstancePool;
use crate::{Result, SearchError, SearchQuery, SearchResult};

/// Resilient search client over a pool of interchangeable instances.
///
/// Every call reshuffles the pool and retries from scratch; no per-instance
/// health state survives between calls.
pub struct Search {
    config: SearchConfig,
    pool: InstancePool,
    loader: PageLoader,
    extractor: Extractor,
}

impl Search {
    /// Creates a search client with an HTTP fetcher built from the
    /// configuration.
    pub fn new(config: SearchConfig) -> Self {
        let fetcher = Arc::new(HttpFetcher::with_timeout(Duration::from_secs(
            config.timeout_seconds,
        )));
        Self::with_fetcher(config, fetcher)
    }

    /// Creates a search client over a custom page fetcher.
    pub fn with_fetcher(config: SearchConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let pool = InstancePool::new(config.instances.clone());
        let loader = PageLoader::new(fetcher, &config);
        Self {
            config,
            pool,
            loader,
            extractor: Extractor::new(),
        }
    }

    /// Returns the number of configured instances.
    pub fn instance_count(&self) -> usize {
        self.pool.len()
    }

    /// Runs the query in the mode it selects: detailed aggregation when
    /// `query.detailed` is set, the standard retry/fallback mode otherwise.
    pub async fn execute(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        if query.detailed {
            self.search_detailed(query).await
        } else {
            self.search(query).await
        }
    }

    /// Standard mode: one result set from the first instance that yields one.
    ///
    /// Rotates through a fresh shuffle of the pool, retrying up to the
    /// configured budget with a fixed backoff between attempts. On
    /// exhaustion the last fetched (possibly empty) result set is returned;
    /// if no attempt ever produced a result page, the call fails with
    /// [`SearchError::RetriesExhausted`].
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        self.check_preconditions(query)?;
        let query = self.effective_query(query);
        let order = self.pool.shuffled();
        self.search_with_order(&query, &order).await
    }

    /// Detailed mode: fan the query out across several instances and pages,
    /// merging with URL deduplication.
    ///
    /// Instances are consumed one at a time until `max_servers` of them have
    /// contributed results or the shuffle is exhausted. Partial results are
    /// valid output, never an error.
    pub async fn search_detailed(&self, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        self.check_preconditions(query)?;
        let query = self.effective_query(query);
        let order = self.pool.shuffled();
        self.search_detailed_with_order(&query, &order).await
    }

    async fn search_with_order(
        &self,
        query: &SearchQuery,
        order: &[String],
    ) -> Result<Vec<SearchResult>> {
        let max_retries = self.config.max_retries;
        let mut last: Option<Vec<SearchResult>> = None;

        for attempt in 0..max_retries {
            let instance = &order[attempt % order.len()];
            debug!(
                "Attempt {}/{} against {}",
                attempt + 1,
                max_retries,
                instance
            );

            match self.loader.load(instance, query, query.page).await {
                Ok(html) => {
                    let results = self.extractor.extract(&html);
                    if !results.is_empty() {
                        debug!("Instance {} returned {} results", instance, results.len());
                        return Ok(results);
                    }
                    warn!("Instance {} returned a page with no results", instance);
                    last = Some(results);
                }
                Err(e) => {
                    warn!("Instance {} failed: {}", instance, e);
                }
            }

            if attempt + 1 < max_retries {
                sleep(Duration::from_millis(self.config.retry_backoff_ms)).await;
            }
        }

        last.ok_or(SearchError::RetriesExhausted {
            attempts: max_retries,
        })
    }

    async fn search_detailed_with_order(
        &self,
        query: &SearchQuery,
        order: &[String],
    ) -> Result<Vec<SearchResult>> {
        let mut aggregator = Aggregator::new();
        let mut successful = 0usize;

        for instance in order {
            if successful >= self.config.max_servers {
                break;
            }

            let mut contributed = false;
            for page in 1..=self.config.max_pages_per_server {
                match self.loader.load(instance, query, page as u32).await {
                    Ok(html) => {
                        let results = self.extractor.extract(&html);
                        if !results.is_empty() {
                            contributed = true;
                        }
                        let added = aggregator.merge(results);
                        debug!(
                            "Instance {} page {} added {} new results",
                            instance, page, added
                        );
                    }
                    Err(e) => {
                        warn!("Instance {} page {} failed: {}", instance, page, e);
                    }
                }
            }

            if contributed {
                successful += 1;
                debug!(
                    "Instance {} contributed ({}/{} servers)",
                    instance, successful, self.config.max_servers
                );
            }
        }

        Ok(aggregator.into_results())
    }

    fn check_preconditions(&self, query: &SearchQuery) -> Result<()> {
        if self.pool.is_empty() {
            return Err(SearchError::NoInstances);
        }
        if query.query.trim().is_empty() {
            return Err(SearchError::InvalidQuery("Query cannot be empty".into()));
        }
        Ok(())
    }

    /// Fills in the configured default language when the query has none.
    fn effective_query(&self, query: &SearchQuery) -> SearchQuery {
        let mut query = query.clone();
        if query.language.is_none() {
            query.language = self.config.default_language.clone();
        }
        query
    }
}
