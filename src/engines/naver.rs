//! Naver search engine adapter (web documents tab).

use scraper::ElementRef;
use url::Url;

use crate::document::{attr, child_attr, child_text};
use crate::engine::{build_search_url, set_query_param, QueryParams};
use crate::{
    BrowserConfig, Engine, EngineConfig, Result, SearchError, SearchOptions, SearchResult,
    TimeRange,
};

/// Naver search engine.
pub struct Naver {
    config: EngineConfig,
}

impl Naver {
    /// Creates a new Naver engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig {
                name: "Naver".to_string(),
                shortcut: "naver".to_string(),
                base_url: "https://search.naver.com".to_string(),
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

impl Default for Naver {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for Naver {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn search_url(&self, query: &str, options: &SearchOptions) -> Result<Url> {
        build_search_url(self, "search.naver", "query", query, &[("where", "web")], options)
    }

    fn time_range_params(&self, range: TimeRange) -> QueryParams {
        let period = match range {
            TimeRange::Any => return Vec::new(),
            TimeRange::Hour => "1h",
            TimeRange::Day => "1d",
            TimeRange::Week => "1w",
            TimeRange::Month => "1m",
            TimeRange::Year => "1y",
        };
        vec![("nso", format!("so:r,p:{},a:all", period))]
    }

    fn result_selector(&self) -> &str {
        "ul.lst_total > li.bx"
    }

    fn extract_result(&self, item: ElementRef<'_>) -> SearchResult {
        SearchResult {
            title: child_text(item, "a.link_tit"),
            link: child_attr(item, "a.link_tit", "href"),
            description: child_text(item, ".total_dsc"),
        }
    }

    fn pagination_selector(&self) -> &str {
        "a.btn_next:not([aria-disabled='true'])"
    }

    fn pagination_url(
        &self,
        _page: u32,
        options: &SearchOptions,
        control: ElementRef<'_>,
        current: &Url,
    ) -> Result<Url> {
        let href = attr(control, "href");
        if href.is_empty() {
            return Err(SearchError::Parse("Naver next-page link has no href".to_string()));
        }
        // hrefs are query-only ("?where=web&start=16"), relative to search.naver
        let mut next = current.join(&href)?;
        set_query_param(&mut next, &self.config.lang_param, &options.lang);
        Ok(next)
    }
}
