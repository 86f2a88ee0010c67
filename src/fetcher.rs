//! Page fetcher abstraction for retrieving HTML content.

use async_trait::async_trait;
use url::Url;

use crate::Result;

/// Trait for fetching the HTML of a result page.
///
/// Implementations must send `user_agent` as the request's `User-Agent`
/// and fail with [`SearchError::Status`] on a non-success response.
///
/// [`SearchError::Status`]: crate::SearchError::Status
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the HTML content of the given URL.
    async fn fetch(&self, url: &Url, user_agent: &str) -> Result<String>;
}
