//! DuckDuckGo search engine adapter (HTML frontend).

use scraper::ElementRef;
use url::Url;

use crate::document::{child_attr, child_text, parent};
use crate::engine::{build_search_url, set_query_param, QueryParams};
use crate::{
    BrowserConfig, Engine, EngineConfig, Result, SearchError, SearchOptions, SearchResult,
    TimeRange,
};

/// Settings that turn off JavaScript-only features, ads and auto-loading.
const SETTINGS: &[(&str, &str)] = &[
    ("kd", "-1"),
    ("kc", "-1"),
    ("kac", "-1"),
    ("k1", "-1"),
    ("kk", "-1"),
    ("kak", "-1"),
    ("kax", "-1"),
    ("kaq", "-1"),
    ("kao", "-1"),
    ("kap", "-1"),
    ("kau", "-1"),
    ("kz", "-1"),
];

/// DuckDuckGo search engine.
pub struct DuckDuckGo {
    config: EngineConfig,
}

impl DuckDuckGo {
    /// Creates a new DuckDuckGo engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig {
                name: "DuckDuckGo".to_string(),
                shortcut: "ddg".to_string(),
                base_url: "https://html.duckduckgo.com".to_string(),
                lang_param: "kl".to_string(),
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

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for DuckDuckGo {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn search_url(&self, query: &str, options: &SearchOptions) -> Result<Url> {
        build_search_url(self, "html/", "q", query, SETTINGS, options)
    }

    fn time_range_params(&self, range: TimeRange) -> QueryParams {
        let value = match range {
            TimeRange::Any => return Vec::new(),
            // No hour filter; a day is the closest.
            TimeRange::Hour | TimeRange::Day => "d",
            TimeRange::Week => "w",
            TimeRange::Month => "m",
            TimeRange::Year => "y",
        };
        vec![("df", value.to_string())]
    }

    fn result_selector(&self) -> &str {
        ".result"
    }

    fn extract_result(&self, item: ElementRef<'_>) -> SearchResult {
        let href = child_attr(item, "a.result__a", "href");
        let link = if href.starts_with("//duckduckgo.com/l/") {
            extract_redirect_url(&href).unwrap_or(href)
        } else {
            href
        };
        SearchResult {
            title: child_text(item, ".result__title"),
            link,
            description: child_text(item, ".result__snippet"),
        }
    }

    fn pagination_selector(&self) -> &str {
        ".nav-link [value='Next']"
    }

    /// The "Next" button submits a form whose hidden `s`/`dc` fields carry
    /// the result offset; those replace the values on the current request.
    fn pagination_url(
        &self,
        _page: u32,
        _options: &SearchOptions,
        control: ElementRef<'_>,
        current: &Url,
    ) -> Result<Url> {
        let form = parent(control)
            .ok_or_else(|| SearchError::Parse("DuckDuckGo next button has no form".to_string()))?;
        let mut next = current.clone();
        set_query_param(&mut next, "s", &child_attr(form, "[name='s']", "value"));
        set_query_param(&mut next, "dc", &child_attr(form, "[name='dc']", "value"));
        Ok(next)
    }
}

/// Target of a `//duckduckgo.com/l/?...&uddg=<target>` redirect link.
fn extract_redirect_url(href: &str) -> Option<String> {
    let url = Url::parse(&format!("https:{}", href)).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, target)| target.into_owned())
}
