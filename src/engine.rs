//! Search engine adapter trait and configuration.

use chrono::NaiveDate;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{BrowserConfig, Result, SearchOptions, SearchResult, TimeRange};

/// Query parameters contributed by a time filter.
pub type QueryParams = Vec<(&'static str, String)>;

/// Configuration for a search engine adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Display name of the engine.
    pub name: String,
    /// Short identifier (e.g., "ddg" for DuckDuckGo).
    pub shortcut: String,
    /// Scheme and host requests are sent to.
    pub base_url: String,
    /// Query parameter carrying the result language.
    pub lang_param: String,
    /// User-agent families accepted by the engine.
    #[serde(default = "default_browsers")]
    pub browsers: BrowserConfig,
}

fn default_browsers() -> BrowserConfig {
    BrowserConfig::desktop_and_mobile()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            shortcut: String::new(),
            base_url: String::new(),
            lang_param: "hl".to_string(),
            browsers: default_browsers(),
        }
    }
}

/// Describes how to query, extract from and paginate one search engine.
///
/// Adapters are immutable and hold no per-crawl state; a [`CrawlSession`]
/// drives them.
///
/// [`CrawlSession`]: crate::CrawlSession
pub trait Engine: Send + Sync {
    /// Returns the engine configuration.
    fn config(&self) -> &EngineConfig;

    /// Builds the first-page URL.
    fn search_url(&self, query: &str, options: &SearchOptions) -> Result<Url>;

    /// Parameters for a coarse time range. Empty for [`TimeRange::Any`].
    fn time_range_params(&self, range: TimeRange) -> QueryParams;

    /// Parameters for explicit date bounds, or `None` when the engine has no
    /// such filter.
    fn date_range_params(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<QueryParams> {
        let _ = (from, to);
        None
    }

    /// CSS pattern matching one result item.
    fn result_selector(&self) -> &str;

    /// Reads a result out of a matched item.
    fn extract_result(&self, item: ElementRef<'_>) -> SearchResult;

    /// CSS pattern matching the "next page" control.
    fn pagination_selector(&self) -> &str;

    /// Builds the absolute URL of page `page` from the matched control.
    fn pagination_url(
        &self,
        page: u32,
        options: &SearchOptions,
        control: ElementRef<'_>,
        current: &Url,
    ) -> Result<Url>;

    /// Time filter parameters for the options: explicit bounds win over the
    /// time range when the engine supports them.
    fn time_filter_params(&self, options: &SearchOptions) -> QueryParams {
        if options.has_date_bounds() {
            if let Some(params) = self.date_range_params(options.from, options.to) {
                return params;
            }
        }
        self.time_range_params(options.time_range)
    }

    /// Returns the engine name.
    fn name(&self) -> &str {
        &self.config().name
    }

    /// Returns the engine shortcut.
    fn shortcut(&self) -> &str {
        &self.config().shortcut
    }

    /// Returns the accepted user-agent families.
    fn browsers(&self) -> BrowserConfig {
        self.config().browsers
    }
}

/// Builds `{base_url}/{path}` with the query, fixed parameters, time filter
/// and language appended in that order.
pub(crate) fn build_search_url(
    engine: &dyn Engine,
    path: &str,
    query_param: &str,
    query: &str,
    fixed: &[(&str, &str)],
    options: &SearchOptions,
) -> Result<Url> {
    let config = engine.config();
    let mut url = Url::parse(&config.base_url)?.join(path)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(query_param, query);
        for (key, value) in fixed {
            pairs.append_pair(key, value);
        }
        for (key, value) in engine.time_filter_params(options) {
            pairs.append_pair(key, &value);
        }
        pairs.append_pair(&config.lang_param, &options.lang);
    }
    Ok(url)
}

/// Resolves `href` against the engine host and rewrites its language parameter.
pub(crate) fn localized_url(config: &EngineConfig, href: &str, lang: &str) -> Result<Url> {
    let mut url = Url::parse(&config.base_url)?.join(href)?;
    set_query_param(&mut url, &config.lang_param, lang);
    Ok(url)
}

/// Replaces every value of `key` in the query string with `value`.
pub fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (k, v) in &kept {
        pairs.append_pair(k, v);
    }
    pairs.append_pair(key, value);
}
