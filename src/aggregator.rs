//! Result merging: round-robin interleave across engines, deduplicated by link.

use std::collections::HashSet;

use tracing::debug;

use crate::result::EngineFailure;
use crate::session::CrawlReport;
use crate::{SearchResult, SearchResults};

/// Interleaves per-engine lists by rank.
///
/// Position 0 of every list comes first (in list order), then position 1,
/// and so on. Exhausted lists are skipped.
pub fn interleave(lists: Vec<Vec<SearchResult>>) -> Vec<SearchResult> {
    let total = lists.iter().map(Vec::len).sum();
    let mut iters: Vec<_> = lists.into_iter().map(Vec::into_iter).collect();
    let mut merged = Vec::with_capacity(total);

    while merged.len() < total {
        for iter in iters.iter_mut() {
            if let Some(result) = iter.next() {
                merged.push(result);
            }
        }
    }
    merged
}

/// Drops every result whose link was already seen. First occurrence wins.
pub fn dedup_by_link(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|result| seen.insert(result.link.clone()))
        .collect()
}

/// Interleaves then deduplicates.
pub fn merge(lists: Vec<Vec<SearchResult>>) -> Vec<SearchResult> {
    dedup_by_link(interleave(lists))
}

/// Folds crawl reports into a single merged result set.
#[derive(Debug, Default)]
pub struct Aggregator;

impl Aggregator {
    /// Creates a new aggregator.
    pub fn new() -> Self {
        Self
    }

    /// Merges the reports in order.
    ///
    /// A failed engine contributes an empty list to the interleave and is
    /// recorded as an [`EngineFailure`].
    pub fn aggregate(&self, reports: Vec<CrawlReport>) -> SearchResults {
        let mut lists = Vec::with_capacity(reports.len());
        let mut failures = Vec::new();
        let mut pages_fetched = 0;

        for report in reports {
            pages_fetched += report.pages_fetched;
            match report.outcome {
                Ok(results) => lists.push(results),
                Err(e) => {
                    failures.push(EngineFailure {
                        engine: report.engine,
                        status: e.status_code(),
                        message: e.to_string(),
                    });
                    lists.push(Vec::new());
                }
            }
        }

        let before: usize = lists.iter().map(Vec::len).sum();
        let merged = merge(lists);
        debug!(before, after = merged.len(), "results merged");

        let mut results = SearchResults::from_results(merged);
        results.pages_fetched = pages_fetched;
        for failure in failures {
            results.add_failure(failure);
        }
        results
    }
}
