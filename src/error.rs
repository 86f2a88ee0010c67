//! Error types for the crawler.

use thiserror::Error;

/// Result type alias for crawl operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while crawling search engines.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The engine answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// The request URL that failed.
        url: String,
    },

    /// Failed to parse a selector or response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// No engine registered under the given name.
    #[error("Unknown search engine '{0}'")]
    UnknownEngine(String),

    /// No engines were requested.
    #[error("No search engines selected")]
    NoEngines,

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The browser configuration enables no user-agent family.
    #[error("Browser configuration enables no user-agent family")]
    NoBrowserFamilies,

    /// Crawl deadline exceeded.
    #[error("Search timeout exceeded")]
    Timeout,

    /// A crawl task panicked or was aborted.
    #[error("Crawl task failed: {0}")]
    Task(String),

    /// Failed to encode results for output.
    #[error("Failed to serialize results: {0}")]
    Serialize(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

impl SearchError {
    /// Returns the HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
