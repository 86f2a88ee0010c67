//! Single-engine crawl: the pagination-following state machine.
//!
//! ```text
//! Init ──> Fetching ──> Parsing ──> Done
//!   │         │  ^          │
//!   │         │  └──────────┘ next page allowed and present
//!   └─────────┴──> Failed
//! ```
//!
//! Pages are fetched strictly one after another: the next URL only exists
//! once the current page has been parsed.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use crate::document::{parent, selector};
use crate::fetcher::PageFetcher;
use crate::{Engine, Result, SearchError, SearchOptions, SearchResult, UserAgentGenerator};

/// Observable status of a crawl session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlStatus {
    Running,
    Done,
    Failed {
        /// HTTP status of the failing request, when there was one.
        code: Option<u16>,
    },
}

#[derive(Debug)]
enum CrawlState {
    Init,
    Fetching(Url),
    Parsing { url: Url, body: String },
    Done,
    Failed(SearchError),
}

/// Outcome of one parsed page.
struct ParsedPage {
    results: Vec<SearchResult>,
    next_url: Option<Url>,
}

/// Live view of a session's progress, shared with whoever spawned it.
///
/// Stays readable after the session future is dropped, e.g. on a deadline.
#[derive(Debug, Clone, Default)]
pub struct CrawlProgress {
    pages_fetched: Arc<AtomicU32>,
    user_agent: Arc<OnceCell<String>>,
    status: Arc<OnceCell<CrawlStatus>>,
}

impl CrawlProgress {
    /// Pages requested so far, including a failing or unfinished one.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched.load(Ordering::Relaxed)
    }

    /// User agent the session identifies as, once assigned.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.get().map(String::as_str)
    }

    /// `Running` until the session reaches a terminal state.
    pub fn status(&self) -> CrawlStatus {
        self.status.get().copied().unwrap_or(CrawlStatus::Running)
    }

    fn page_requested(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    fn finish(&self, status: CrawlStatus) {
        let _ = self.status.set(status);
    }
}

/// Final report of a crawl session.
#[derive(Debug)]
pub struct CrawlReport {
    /// Engine name.
    pub engine: String,
    /// User agent the session identified as. Empty if none was assigned.
    pub user_agent: String,
    /// Number of pages requested, including a failing one.
    pub pages_fetched: u32,
    /// Results in page order, or the error that ended the crawl.
    pub outcome: Result<Vec<SearchResult>>,
}

impl CrawlReport {
    /// Report for a session that never produced results.
    pub fn failed(engine: impl Into<String>, error: SearchError) -> Self {
        Self {
            engine: engine.into(),
            user_agent: String::new(),
            pages_fetched: 0,
            outcome: Err(error),
        }
    }

    /// Report for a session cut short from outside, keeping what it got to.
    pub fn interrupted(engine: impl Into<String>, progress: &CrawlProgress, error: SearchError) -> Self {
        let report = Self {
            engine: engine.into(),
            user_agent: progress.user_agent().unwrap_or_default().to_string(),
            pages_fetched: progress.pages_fetched(),
            outcome: Err(error),
        };
        progress.finish(report.status());
        report
    }

    /// Terminal status of the session.
    pub fn status(&self) -> CrawlStatus {
        match &self.outcome {
            Ok(_) => CrawlStatus::Done,
            Err(e) => CrawlStatus::Failed {
                code: e.status_code(),
            },
        }
    }

    /// Results of the session; empty when it failed.
    pub fn results(&self) -> &[SearchResult] {
        match &self.outcome {
            Ok(results) => results,
            Err(_) => &[],
        }
    }
}

/// Drives one engine adapter through its result pages.
pub struct CrawlSession {
    engine: Arc<dyn Engine>,
    fetcher: Arc<dyn PageFetcher>,
    generator: Arc<UserAgentGenerator>,
    query: String,
    options: Arc<SearchOptions>,
    page: u32,
    progress: CrawlProgress,
    results: Vec<SearchResult>,
    user_agent: String,
}

impl CrawlSession {
    /// Creates a session for `engine`, using the default user-agent pools.
    pub fn new(
        engine: Arc<dyn Engine>,
        fetcher: Arc<dyn PageFetcher>,
        query: impl Into<String>,
        options: Arc<SearchOptions>,
    ) -> Self {
        Self {
            engine,
            fetcher,
            generator: Arc::new(UserAgentGenerator::default()),
            query: query.into(),
            options,
            page: 1,
            progress: CrawlProgress::default(),
            results: Vec::new(),
            user_agent: String::new(),
        }
    }

    /// Uses the given user-agent generator.
    pub fn with_generator(mut self, generator: Arc<UserAgentGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Handle for observing the session while it runs.
    pub fn progress(&self) -> CrawlProgress {
        self.progress.clone()
    }

    /// Runs the session to a terminal state.
    pub async fn run(mut self) -> CrawlReport {
        let mut state = CrawlState::Init;
        loop {
            state = match state {
                CrawlState::Init => self.init(),
                CrawlState::Fetching(url) => self.fetch(url).await,
                CrawlState::Parsing { url, body } => self.parse(&url, &body),
                CrawlState::Done => {
                    debug!(
                        engine = self.engine.name(),
                        pages = self.progress.pages_fetched(),
                        results = self.results.len(),
                        "crawl done"
                    );
                    let results = std::mem::take(&mut self.results);
                    return self.report(Ok(results));
                }
                CrawlState::Failed(err) => {
                    warn!(engine = self.engine.name(), page = self.page, error = %err, "crawl failed");
                    return self.report(Err(err));
                }
            };
        }
    }

    fn init(&mut self) -> CrawlState {
        let user_agent = match &self.options.user_agent {
            Some(ua) => Ok(ua.clone()),
            None => self
                .generator
                .generate(&self.engine.browsers(), &mut rand::thread_rng()),
        };
        match user_agent {
            Ok(ua) => {
                let _ = self.progress.user_agent.set(ua.clone());
                self.user_agent = ua;
            }
            Err(e) => return CrawlState::Failed(e),
        }
        debug!(engine = self.engine.name(), user_agent = %self.user_agent, "crawl started");

        match self.engine.search_url(&self.query, &self.options) {
            Ok(url) => CrawlState::Fetching(url),
            Err(e) => CrawlState::Failed(e),
        }
    }

    async fn fetch(&mut self, url: Url) -> CrawlState {
        debug!(engine = self.engine.name(), page = self.page, %url, "fetching");
        self.progress.page_requested();
        match self.fetcher.fetch(&url, &self.user_agent).await {
            Ok(body) => CrawlState::Parsing { url, body },
            Err(e) => {
                if self.options.verbose {
                    debug!(engine = self.engine.name(), %url, user_agent = %self.user_agent, "failing request");
                }
                CrawlState::Failed(e)
            }
        }
    }

    fn parse(&mut self, url: &Url, body: &str) -> CrawlState {
        match self.parse_page(url, body) {
            Ok(page) => {
                debug!(
                    engine = self.engine.name(),
                    page = self.page,
                    results = page.results.len(),
                    "page parsed"
                );
                self.results.extend(page.results);
                match page.next_url {
                    Some(next) => {
                        self.page += 1;
                        CrawlState::Fetching(next)
                    }
                    None => CrawlState::Done,
                }
            }
            Err(e) => CrawlState::Failed(e),
        }
    }

    /// Extracts the page's results and, when allowed, the next page's URL.
    fn parse_page(&self, url: &Url, body: &str) -> Result<ParsedPage> {
        let document = Html::parse_document(body);
        let result_selector = selector(self.engine.result_selector())?;
        let pagination_selector = selector(self.engine.pagination_selector())?;

        let mut results = Vec::new();
        for item in document.select(&result_selector) {
            if self.options.verbose {
                let attrs: Vec<_> = item.value().attrs().collect();
                let parent_attrs: Vec<_> = parent(item)
                    .map(|p| p.value().attrs().collect())
                    .unwrap_or_default();
                debug!(?attrs, parent = ?parent_attrs, "selected result item");
            }
            results.push(self.engine.extract_result(item));
        }

        // A control without a usable target ends the crawl like a missing one.
        let next_url = match document.select(&pagination_selector).next() {
            Some(control) if self.options.pages.allows_after(self.page) => {
                match self
                    .engine
                    .pagination_url(self.page + 1, &self.options, control, url)
                {
                    Ok(next) => Some(next),
                    Err(e) => {
                        warn!(engine = self.engine.name(), page = self.page, error = %e, "unusable next-page control");
                        None
                    }
                }
            }
            _ => None,
        };

        Ok(ParsedPage { results, next_url })
    }

    fn report(self, outcome: Result<Vec<SearchResult>>) -> CrawlReport {
        let report = CrawlReport {
            engine: self.engine.name().to_string(),
            user_agent: self.user_agent,
            pages_fetched: self.progress.pages_fetched(),
            outcome,
        };
        self.progress.finish(report.status());
        report
    }
}
