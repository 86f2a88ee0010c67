//! Yahoo search engine adapter.

use scraper::ElementRef;
use url::Url;

use crate::document::{attr, child_attr, child_text};
use crate::engine::{build_search_url, QueryParams};
use crate::{
    BrowserConfig, Engine, EngineConfig, Result, SearchError, SearchOptions, SearchResult,
    TimeRange,
};

/// Yahoo search engine.
pub struct Yahoo {
    config: EngineConfig,
}

impl Yahoo {
    /// Creates a new Yahoo engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig {
                name: "Yahoo".to_string(),
                shortcut: "y".to_string(),
                base_url: "https://search.yahoo.com".to_string(),
                lang_param: "lang".to_string(),
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

impl Default for Yahoo {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for Yahoo {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn search_url(&self, query: &str, options: &SearchOptions) -> Result<Url> {
        build_search_url(self, "search", "p", query, &[], options)
    }

    fn time_range_params(&self, range: TimeRange) -> QueryParams {
        // No hour or year filter on Yahoo; use the nearest bucket.
        let bucket = match range {
            TimeRange::Any => return Vec::new(),
            TimeRange::Hour | TimeRange::Day => "d",
            TimeRange::Week => "w",
            TimeRange::Month | TimeRange::Year => "m",
        };
        vec![
            ("fr2", "time".to_string()),
            ("age", format!("1{}", bucket)),
            ("btf", bucket.to_string()),
        ]
    }

    fn result_selector(&self) -> &str {
        ".algo-sr"
    }

    fn extract_result(&self, item: ElementRef<'_>) -> SearchResult {
        let href = child_attr(item, "h3.title a", "href");
        SearchResult {
            title: child_text(item, "h3.title"),
            link: unwrap_redirect(&href).unwrap_or(href),
            description: child_text(item, "div.compText"),
        }
    }

    fn pagination_selector(&self) -> &str {
        ".compPagination a.next"
    }

    fn pagination_url(
        &self,
        _page: u32,
        _options: &SearchOptions,
        control: ElementRef<'_>,
        current: &Url,
    ) -> Result<Url> {
        let href = attr(control, "href");
        if href.is_empty() {
            return Err(SearchError::Parse("Yahoo next-page link has no href".to_string()));
        }
        Ok(current.join(&href)?)
    }
}

/// Extracts the target from an `r.search.yahoo.com` click-tracking link.
fn unwrap_redirect(href: &str) -> Option<String> {
    let start = href.find("/RU=")? + "/RU=".len();
    let rest = &href[start..];
    let end = rest.find("/RK=").unwrap_or(rest.len());
    let decoded = urlencoding::decode(&rest[..end]).ok()?;
    Some(decoded.into_owned())
}
