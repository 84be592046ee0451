//! Result aggregation across pages and instances.

use std::collections::HashSet;

use crate::SearchResult;

/// Accumulates result sets, deduplicating by URL.
///
/// The first occurrence of a URL wins; later duplicates are discarded, not
/// reordered. Output order is the order results were merged in.
#[derive(Debug, Default)]
pub struct Aggregator {
    seen: HashSet<String>,
    results: Vec<SearchResult>,
}

impl Aggregator {
    /// Creates a new empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one result set, returning how many entries were new.
    pub fn merge(&mut self, batch: Vec<SearchResult>) -> usize {
        let mut added = 0;
        for result in batch {
            if self.seen.insert(result.url.clone()) {
                self.results.push(result);
                added += 1;
            }
        }
        added
    }

    /// Returns the number of distinct results accumulated so far.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns whether nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Consumes the aggregator and returns the accumulated results.
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
    }
}
