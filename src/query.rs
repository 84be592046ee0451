//! Search query representation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SearchError;

/// Time range filter for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
}

impl TimeRange {
    /// Returns the wire value used in the `time_range` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }
}

impl FromStr for TimeRange {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(TimeRange::Day),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            other => Err(SearchError::InvalidQuery(format!(
                "unknown time range '{}' (expected day, week, month or year)",
                other
            ))),
        }
    }
}

/// A search query with all parameters.
///
/// Immutable for the duration of one call; construct with [`SearchQuery::new`]
/// and the `with_*` builder methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The search terms.
    pub query: String,
    /// Time range filter.
    pub time_range: Option<TimeRange>,
    /// Language code (e.g., "en").
    pub language: Option<String>,
    /// Page number (1-indexed).
    pub page: u32,
    /// Whether to run the multi-page multi-server detailed mode.
    pub detailed: bool,
}

impl SearchQuery {
    /// Creates a new search query with the given terms.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            time_range: None,
            language: None,
            page: 1,
            detailed: false,
        }
    }

    /// Sets the time range filter.
    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    /// Sets the language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Enables or disables detailed mode.
    pub fn with_detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }
}
