//! # googly
//!
//! A multi-engine web search crawler.
//!
//! One crawl session runs per requested engine, concurrently. Each session
//! identifies itself with a generated browser user agent, follows the
//! engine's pagination up to a page limit, and extracts title, link and
//! description from every result. The per-engine lists are then merged by
//! rank (round-robin) and deduplicated by link.
//!
//! - Google, Ecosia, Startpage, Yahoo, DuckDuckGo and Naver adapters
//! - Relative time ranges and explicit date bounds
//! - Per-engine failure isolation
//!
//! ## Example
//!
//! ```rust,no_run
//! use googly::{PageLimit, Search, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let search = Search::new()?;
//!     let options = SearchOptions::new().with_pages(PageLimit::Limited(2));
//!     let engines = vec!["google".to_string(), "ddg".to_string()];
//!
//!     let results = search.search("rust ownership", &options, &engines).await?;
//!     for result in results.items() {
//!         println!("{}: {}", result.title, result.link);
//!     }
//!     Ok(())
//! }
//! ```

mod engine;
mod error;
mod query;
mod result;
mod aggregator;
mod search;
mod session;
mod user_agent;

pub mod document;
pub mod engines;
pub mod fetcher;
pub mod fetcher_http;

pub use engine::{set_query_param, Engine, EngineConfig, QueryParams};
pub use error::{SearchError, Result};
pub use query::{PageLimit, SearchOptions, TimeRange};
pub use result::{EngineFailure, SearchResult, SearchResults};
pub use aggregator::{dedup_by_link, interleave, merge, Aggregator};
pub use search::Search;
pub use session::{CrawlProgress, CrawlReport, CrawlSession, CrawlStatus};
pub use user_agent::{BrowserConfig, BrowserFamily, UserAgentGenerator, UserAgentPools};
pub use fetcher::PageFetcher;
pub use fetcher_http::HttpFetcher;
pub use engines::EngineRegistry;
