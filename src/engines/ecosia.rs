//! Ecosia search engine adapter.

use scraper::ElementRef;
use url::Url;

use crate::document::{attr, child_attr, child_text};
use crate::engine::{build_search_url, localized_url, QueryParams};
use crate::{
    BrowserConfig, Engine, EngineConfig, Result, SearchError, SearchOptions, SearchResult,
    TimeRange,
};

/// Ecosia search engine.
pub struct Ecosia {
    config: EngineConfig,
}

impl Ecosia {
    /// Creates a new Ecosia engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig {
                name: "Ecosia".to_string(),
                shortcut: "eco".to_string(),
                base_url: "https://www.ecosia.org".to_string(),
                lang_param: "hl".to_string(),
                browsers: BrowserConfig::desktop_and_mobile(),
            },
        }
    }

    /// Creates with custom configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for Ecosia {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for Ecosia {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn search_url(&self, query: &str, options: &SearchOptions) -> Result<Url> {
        build_search_url(self, "search", "q", query, &[], options)
    }

    fn time_range_params(&self, range: TimeRange) -> QueryParams {
        // Ecosia has no hour or year freshness; use the nearest bucket.
        let value = match range {
            TimeRange::Any => return Vec::new(),
            TimeRange::Hour | TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month | TimeRange::Year => "month",
        };
        vec![("freshness", value.to_string())]
    }

    fn result_selector(&self) -> &str {
        ".js-result .result-body"
    }

    fn extract_result(&self, item: ElementRef<'_>) -> SearchResult {
        SearchResult {
            title: child_text(item, ".result-title"),
            link: child_attr(item, "a.result-title", "href"),
            description: child_text(item, ".result-snippet"),
        }
    }

    fn pagination_selector(&self) -> &str {
        "a.pagination-next"
    }

    fn pagination_url(
        &self,
        _page: u32,
        options: &SearchOptions,
        control: ElementRef<'_>,
        _current: &Url,
    ) -> Result<Url> {
        let href = attr(control, "href");
        if href.is_empty() {
            return Err(SearchError::Parse("Ecosia next-page link has no href".to_string()));
        }
        localized_url(&self.config, &href, &options.lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::selector;
    use scraper::Html;

    const RESULTS_HTML: &str = r#"
        <div class="mainline">
            <div class="js-result">
                <div class="result-body">
                    <a class="result-title" href="https://crates.io/">crates.io</a>
                    <p class="result-snippet">The Rust community's crate registry</p>
                </div>
            </div>
            <div class="js-result">
                <div class="result-body">
                    <a class="result-title" href="https://docs.rs/">Docs.rs</a>
                </div>
            </div>
        </div>
        <a class="pagination-next" href="/search?p=1&amp;q=rust">Next</a>
    "#;

    #[test]
    fn test_ecosia_search_url() {
        let engine = Ecosia::new();
        let url = engine.search_url("rust", &SearchOptions::new()).unwrap();
        assert_eq!(url.as_str(), "https://www.ecosia.org/search?q=rust&hl=en");
    }

    #[test]
    fn test_ecosia_coarse_buckets() {
        let engine = Ecosia::new();
        assert!(engine.time_range_params(TimeRange::Any).is_empty());
        assert_eq!(engine.time_range_params(TimeRange::Hour), vec![("freshness", "day".to_string())]);
        assert_eq!(engine.time_range_params(TimeRange::Week), vec![("freshness", "week".to_string())]);
        assert_eq!(engine.time_range_params(TimeRange::Year), vec![("freshness", "month".to_string())]);
    }

    #[test]
    fn test_ecosia_ignores_date_bounds() {
        let engine = Ecosia::new();
        let options = SearchOptions::new()
            .with_time_range(TimeRange::Week)
            .with_from(chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(engine.time_filter_params(&options), vec![("freshness", "week".to_string())]);
    }

    #[test]
    fn test_ecosia_extract_results() {
        let engine = Ecosia::new();
        let doc = Html::parse_document(RESULTS_HTML);
        let sel = selector(engine.result_selector()).unwrap();
        let results: Vec<_> = doc.select(&sel).map(|item| engine.extract_result(item)).collect();
        assert_eq!(
            results,
            vec![
                SearchResult::new("crates.io", "https://crates.io/", "The Rust community's crate registry"),
                SearchResult::new("Docs.rs", "https://docs.rs/", ""),
            ]
        );
    }

    #[test]
    fn test_ecosia_pagination_url() {
        let engine = Ecosia::new();
        let doc = Html::parse_document(RESULTS_HTML);
        let sel = selector(engine.pagination_selector()).unwrap();
        let control = doc.select(&sel).next().unwrap();
        let current = Url::parse("https://www.ecosia.org/search?q=rust&hl=de").unwrap();
        let options = SearchOptions::new().with_lang("de");
        let next = engine.pagination_url(2, &options, control, &current).unwrap();
        assert_eq!(next.as_str(), "https://www.ecosia.org/search?p=1&q=rust&hl=de");
    }
}
