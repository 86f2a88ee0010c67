//! Crawl options.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::SearchError;

/// Time range filter for search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Any,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeRange {
    /// All time ranges, in increasing coarseness.
    pub const ALL: [TimeRange; 6] = [
        TimeRange::Any,
        TimeRange::Hour,
        TimeRange::Day,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Year,
    ];

    /// Returns the lowercase name of the range.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SearchError::Other(format!("Unknown time range '{}'", s)))
    }
}

/// How many result pages a crawl session may fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLimit {
    /// Stop after this many pages.
    Limited(u32),
    /// Follow pagination until the engine stops offering a next page.
    Unlimited,
}

impl PageLimit {
    /// Converts a raw page count where any negative value means unlimited.
    pub fn from_raw(pages: i64) -> Self {
        if pages < 0 {
            Self::Unlimited
        } else {
            Self::Limited(u32::try_from(pages).unwrap_or(u32::MAX))
        }
    }

    /// Whether a session currently on `page` may move on to the next one.
    pub fn allows_after(&self, page: u32) -> bool {
        match self {
            Self::Limited(limit) => page < *limit,
            Self::Unlimited => true,
        }
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self::Limited(5)
    }
}

/// Options shared by every session of one crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Result language (e.g., "en").
    pub lang: String,
    /// Page limit per engine.
    pub pages: PageLimit,
    /// Explicit lower date bound.
    pub from: Option<NaiveDate>,
    /// Explicit upper date bound.
    pub to: Option<NaiveDate>,
    /// Coarse recency filter, ignored on engines that honor `from`/`to` when either is set.
    pub time_range: TimeRange,
    /// Fixed user agent. Generated per session when `None`.
    pub user_agent: Option<String>,
    /// Log extra request details.
    pub verbose: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            pages: PageLimit::default(),
            from: None,
            to: None,
            time_range: TimeRange::Any,
            user_agent: None,
            verbose: false,
        }
    }
}

impl SearchOptions {
    /// Creates options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Sets the page limit.
    pub fn with_pages(mut self, pages: PageLimit) -> Self {
        self.pages = pages;
        self
    }

    /// Sets the lower date bound.
    pub fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    /// Sets the upper date bound.
    pub fn with_to(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    /// Sets the time range filter.
    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = range;
        self
    }

    /// Sets a fixed user agent, skipping generation. An empty string is ignored.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        self.user_agent = (!user_agent.is_empty()).then_some(user_agent);
        self
    }

    /// Enables verbose diagnostics.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether explicit date bounds are set.
    pub fn has_date_bounds(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}
