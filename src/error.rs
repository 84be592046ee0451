//! Error types for the search client.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// No search instances configured.
    #[error("No search instances configured")]
    NoInstances,

    /// Instance served its landing page instead of search results.
    #[error("Instance '{0}' redirected to its landing page")]
    BotRedirect(String),

    /// Every retry attempt failed without producing a result page.
    #[error("All {attempts} search attempts failed")]
    RetriesExhausted {
        /// Number of attempts made before giving up.
        attempts: usize,
    },

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}
