//! Search result types.

use quick_xml::se::Serializer;
use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// A single search result.
///
/// Fields that an engine adapter could not extract are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Result URL. Unique across a merged result list.
    pub link: String,
    /// Result description/snippet.
    pub description: String,
}

impl SearchResult {
    /// Creates a new search result.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: description.into(),
        }
    }
}

/// An engine whose crawl ended in failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineFailure {
    /// Engine name.
    pub engine: String,
    /// HTTP status of the failing request, when there was one.
    pub status: Option<u16>,
    /// Human-readable error.
    pub message: String,
}

/// Merged results of a multi-engine crawl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Merged, deduplicated results.
    results: Vec<SearchResult>,
    /// Engines that failed.
    failures: Vec<EngineFailure>,
    /// Number of results.
    pub count: usize,
    /// Total pages fetched across all engines.
    pub pages_fetched: u32,
    /// Crawl duration in milliseconds.
    pub duration_ms: u64,
}

impl SearchResults {
    /// Creates a new empty result container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container from an already merged list.
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        Self {
            count: results.len(),
            results,
            ..Default::default()
        }
    }

    /// Records a failed engine.
    pub fn add_failure(&mut self, failure: EngineFailure) {
        self.failures.push(failure);
    }

    /// Returns the results.
    pub fn items(&self) -> &[SearchResult] {
        &self.results
    }

    /// Consumes the container, returning the results.
    pub fn into_items(self) -> Vec<SearchResult> {
        self.results
    }

    /// Returns the failed engines.
    pub fn failures(&self) -> &[EngineFailure] {
        &self.failures
    }

    /// Sets the crawl duration.
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }
    /// Encodes the results as an indented `<results>` document with one
    /// `<result>` element per entry.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::new();
        let mut serializer = Serializer::new(&mut xml);
        serializer.indent(' ', 2);
        XmlResults {
            result: &self.results,
        }
        .serialize(serializer)
        .map_err(|e| SearchError::Serialize(e.to_string()))?;
        Ok(xml)
    }
}

#[derive(Serialize)]
#[serde(rename = "results")]
struct XmlResults<'a> {
    result: &'a [SearchResult],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_new() {
        let result = SearchResult::new("Title", "https://example.com", "Description");
        assert_eq!(result.title, "Title");
        assert_eq!(result.link, "https://example.com");
        assert_eq!(result.description, "Description");
    }

    #[test]
    fn test_search_result_default_is_empty() {
        let result = SearchResult::default();
        assert_eq!(result.title, "");
        assert_eq!(result.link, "");
        assert_eq!(result.description, "");
    }

    #[test]
    fn test_search_results_from_results() {
        let results = SearchResults::from_results(vec![
            SearchResult::new("a", "https://a.com", ""),
            SearchResult::new("b", "https://b.com", ""),
        ]);
        assert_eq!(results.count, 2);
        assert_eq!(results.items()[1].link, "https://b.com");
        assert!(results.failures().is_empty());
    }

    #[test]
    fn test_search_results_add_failure() {
        let mut results = SearchResults::new();
        results.add_failure(EngineFailure {
            engine: "Yahoo".to_string(),
            status: Some(503),
            message: "HTTP 503".to_string(),
        });
        assert_eq!(results.failures().len(), 1);
        assert_eq!(results.failures()[0].status, Some(503));
    }

    #[test]
    fn test_search_results_set_duration() {
        let mut results = SearchResults::new();
        results.set_duration(150);
        assert_eq!(results.duration_ms, 150);
    }

    #[test]
    fn test_search_result_serialization() {
        let result = SearchResult::new("Title", "https://example.com", "Snippet");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Title","link":"https://example.com","description":"Snippet"}"#
        );
    }

    #[test]
    fn test_search_results_to_xml() {
        let results = SearchResults::from_results(vec![
            SearchResult::new("Rust", "https://www.rust-lang.org/", "Fast & reliable"),
            SearchResult::new("Book", "https://doc.rust-lang.org/book/?a=1&b=2", ""),
        ]);
        let xml = results.to_xml().unwrap();
        assert!(xml.starts_with("<results>"));
        assert!(xml.trim_end().ends_with("</results>"));
        assert_eq!(xml.matches("<result>").count(), 2);
        assert!(xml.contains("<title>Rust</title>"));
        assert!(xml.contains("<link>https://www.rust-lang.org/</link>"));
        assert!(xml.contains("<description>Fast &amp; reliable</description>"));
        assert!(xml.contains("?a=1&amp;b=2"));
        let first = xml.find("<title>Rust</title>").unwrap();
        let second = xml.find("<title>Book</title>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_search_results_into_items() {
        let results = SearchResults::from_results(vec![SearchResult::new("t", "l", "d")]);
        let items = results.into_items();
        assert_eq!(items.len(), 1);
    }
}
