//! Async HTTP client behind the [PageFetcher] trait so the assembler can be
//! exercised against canned pages in tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::scraper::error::ScraperError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; linofeed/0.1; +https://github.com/linofeed)";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_REDIRECTS: usize = 10;

/// Fetches one page of raw text by absolute URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, ScraperError>;
}

/// Production fetcher backed by reqwest.
#[derive(Debug)]
pub struct HttpFetcher {
    inner: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with default User-Agent and timeout.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::builder().build()
    }

    /// Builder for custom User-Agent and/or timeout.
    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::default()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| ScraperError::Network {
                url: url.to_string(),
                source: e,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        response
            .text()
            .await
            .map_err(|e| ScraperError::BodyRead { source: e })
    }
}

/// Builder for [HttpFetcher] with optional User-Agent and timeout.
#[derive(Debug)]
pub struct HttpFetcherBuilder {
    user_agent: Option<String>,
    timeout_secs: u64,
}

impl Default for HttpFetcherBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpFetcherBuilder {
    /// Set a custom User-Agent. If not set, a browser-like default is used.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set request timeout in seconds. Default 30.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<HttpFetcher, reqwest::Error> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let inner = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(user_agent)
            .timeout(Duration::from_secs(self.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(HttpFetcher { inner })
    }
}
