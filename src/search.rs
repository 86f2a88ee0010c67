//! Crawl orchestration across engines.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use crate::engines::EngineRegistry;
use crate::fetcher::PageFetcher;
use crate::fetcher_http::HttpFetcher;
use crate::session::{CrawlReport, CrawlSession};
use crate::{Aggregator, Result, SearchError, SearchOptions, SearchResults, UserAgentGenerator};

/// Runs one crawl session per requested engine and merges their results.
pub struct Search {
    registry: Arc<EngineRegistry>,
    fetcher: Arc<dyn PageFetcher>,
    generator: Arc<UserAgentGenerator>,
    aggregator: Aggregator,
    default_timeout: Option<Duration>,
}

impl Search {
    /// Creates a search over the built-in engines, fetching over HTTP.
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(HttpFetcher::new()?))
    }

    /// Creates a search over the built-in engines with a custom fetcher.
    pub fn with_fetcher<F: PageFetcher + 'static>(fetcher: F) -> Self {
        Self::with_shared_fetcher(Arc::new(fetcher))
    }

    /// Creates a search over the built-in engines with a shared fetcher.
    pub fn with_shared_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            registry: EngineRegistry::global(),
            fetcher,
            generator: Arc::new(UserAgentGenerator::default()),
            aggregator: Aggregator::new(),
            default_timeout: None,
        }
    }

    /// Uses a custom engine registry.
    pub fn with_registry(mut self, registry: EngineRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Uses a custom user-agent generator.
    pub fn with_generator(mut self, generator: UserAgentGenerator) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    /// Bounds each engine's whole crawl. Unset by default.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.default_timeout = Some(timeout);
    }

    /// Returns the engine registry.
    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    /// Crawls every requested engine concurrently.
    ///
    /// Reports come back in request order. The query and every engine name
    /// are validated before any request is made.
    pub async fn crawl(
        &self,
        query: &str,
        options: &SearchOptions,
        engines: &[String],
    ) -> Result<Vec<CrawlReport>> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery("Query cannot be empty".into()));
        }
        if engines.is_empty() {
            return Err(SearchError::NoEngines);
        }
        let selected = engines
            .iter()
            .map(|name| {
                self.registry
                    .get(name)
                    .ok_or_else(|| SearchError::UnknownEngine(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Crawling {} engines", selected.len());
        let options = Arc::new(options.clone());

        let (names, handles): (Vec<_>, Vec<_>) = selected
            .into_iter()
            .map(|engine| {
                let name = engine.name().to_string();
                let session = CrawlSession::new(
                    engine,
                    Arc::clone(&self.fetcher),
                    query,
                    Arc::clone(&options),
                )
                .with_generator(Arc::clone(&self.generator));
                let progress = session.progress();
                let deadline = self.default_timeout;
                let task_name = name.clone();

                let handle = tokio::spawn(async move {
                    match deadline {
                        Some(limit) => match timeout(limit, session.run()).await {
                            Ok(report) => report,
                            Err(_) => {
                                warn!(
                                    "Engine {} timed out after {} pages",
                                    task_name,
                                    progress.pages_fetched()
                                );
                                CrawlReport::interrupted(task_name, &progress, SearchError::Timeout)
                            }
                        },
                        None => session.run().await,
                    }
                });
                (name, handle)
            })
            .unzip();

        let reports = join_all(handles)
            .await
            .into_iter()
            .zip(names)
            .map(|(joined, name)| match joined {
                Ok(report) => report,
                Err(e) => {
                    warn!("Engine {} task aborted: {}", name, e);
                    CrawlReport::failed(name, SearchError::Task(e.to_string()))
                }
            })
            .collect();

        Ok(reports)
    }

    /// Crawls the requested engines and merges their results.
    ///
    /// A failing engine contributes no results; its failure is listed in
    /// [`SearchResults::failures`].
    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
        engines: &[String],
    ) -> Result<SearchResults> {
        let start = Instant::now();
        let reports = self.crawl(query, options, engines).await?;

        for report in &reports {
            match &report.outcome {
                Ok(results) => debug!(
                    "Engine {} returned {} results from {} pages",
                    report.engine,
                    results.len(),
                    report.pages_fetched
                ),
                Err(e) => warn!("Engine {} failed: {}", report.engine, e),
            }
        }

        let mut results = self.aggregator.aggregate(reports);
        results.set_duration(start.elapsed().as_millis() as u64);
        Ok(results)
    }
}
