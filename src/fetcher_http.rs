//! HTTP-based page fetcher using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT_ENCODING, USER_AGENT};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::fetcher::PageFetcher;
use crate::{Result, SearchError};

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 10;

/// A page fetcher that uses plain HTTP GET requests via reqwest.
///
/// Response compression is disabled so pages arrive as plain markup.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a new `HttpFetcher` with the default request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Creates an `HttpFetcher` whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .no_gzip()
            .no_brotli()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Creates an `HttpFetcher` with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, user_agent: &str) -> Result<String> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.as_str())
            .header(USER_AGENT, user_agent)
            .header(ACCEPT_ENCODING, "identity")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text().await?;
        debug!(%url, bytes = html.len(), "page received");
        Ok(html)
    }
}
