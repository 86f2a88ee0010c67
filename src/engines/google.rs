//! Google search engine adapter.
//!
//! Google is the only engine with explicit date bounds (`tbs=cdr:1,...`).
//! It serves degraded markup to mobile user agents, so only desktop
//! families are used.

use chrono::NaiveDate;
use scraper::ElementRef;
use url::Url;

use crate::document::{attr, child_attr, child_text};
use crate::engine::{build_search_url, localized_url, QueryParams};
use crate::{
    BrowserConfig, Engine, EngineConfig, Result, SearchError, SearchOptions, SearchResult,
    TimeRange,
};

/// Google search engine.
pub struct Google {
    config: EngineConfig,
}

impl Google {
    /// Creates a new Google engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig {
                name: "Google".to_string(),
                shortcut: "g".to_string(),
                base_url: "https://www.google.com".to_string(),
                lang_param: "hl".to_string(),
                browsers: BrowserConfig::desktop(),
            },
        }
    }

    /// Creates with custom configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for Google {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for Google {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn search_url(&self, query: &str, options: &SearchOptions) -> Result<Url> {
        build_search_url(self, "search", "q", query, &[], options)
    }

    fn time_range_params(&self, range: TimeRange) -> QueryParams {
        let value = match range {
            TimeRange::Any => return Vec::new(),
            TimeRange::Hour => "qdr:h",
            TimeRange::Day => "qdr:d",
            TimeRange::Week => "qdr:w",
            TimeRange::Month => "qdr:m",
            TimeRange::Year => "qdr:y",
        };
        vec![("tbs", value.to_string())]
    }

    fn date_range_params(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<QueryParams> {
        let mut value = String::from("cdr:1");
        if let Some(from) = from {
            value.push_str(&format!(",cd_min:{}", from.format("%m/%d/%Y")));
        }
        if let Some(to) = to {
            value.push_str(&format!(",cd_max:{}", to.format("%m/%d/%Y")));
        }
        Some(vec![("tbs", value)])
    }

    fn result_selector(&self) -> &str {
        "div.g"
    }

    fn extract_result(&self, item: ElementRef<'_>) -> SearchResult {
        let href = child_attr(item, "a[href]", "href");
        // Non-JS result pages wrap targets in /url?q= redirects
        let link = match href.strip_prefix("/url?q=") {
            Some(target) => {
                let target = target.split('&').next().unwrap_or(target);
                urlencoding::decode(target)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| target.to_string())
            }
            None => href,
        };
        SearchResult {
            title: child_text(item, "h3"),
            link,
            description: child_text(item, "div.VwiC3b, div[data-sncf], span.st"),
        }
    }

    fn pagination_selector(&self) -> &str {
        "a#pnnext"
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
            return Err(SearchError::Parse("Google next-page link has no href".to_string()));
        }
        localized_url(&self.config, &href, &options.lang)
    }
}
