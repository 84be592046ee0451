//! Search result types.

use serde::{Deserialize, Serialize};

/// A single search result.
///
/// The wire payload is exactly these two string fields; callers serialize a
/// `Vec<SearchResult>` to a bare JSON array with no envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result URL. Always non-empty.
    pub url: String,
    /// Result snippet, or the extractor's placeholder when the source block
    /// carried none.
    pub summary: String,
}

impl SearchResult {
    /// Creates a new search result.
    pub fn new(url: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            summary: summary.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_new() {
        let result = SearchResult::new("https://example.com", "A summary");
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.summary, "A summary");
    }

    #[test]
    fn test_search_result_serialization() {
        let result = SearchResult::new("https://example.com", "A summary");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"url":"https://example.com","summary":"A summary"}"#);
    }

    #[test]
    fn test_search_result_deserialization() {
        let json = r#"{"url":"https://example.com","summary":"A summary"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.summary, "A summary");
    }

    #[test]
    fn test_payload_is_bare_array() {
        let results = vec![
            SearchResult::new("https://a.example", "first"),
            SearchResult::new("https://b.example", "second"),
        ];
        let json = serde_json::to_string(&results).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
        assert!(!json.contains("count"));
    }

    #[test]
    fn test_search_result_equality() {
        let a = SearchResult::new("https://example.com", "s");
        let b = SearchResult::new("https://example.com", "s");
        assert_eq!(a, b);
    }
}
