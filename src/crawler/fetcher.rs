//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for pages and image bytes
//! - Retry logic for transient failures
//! - Error classification
//!
//! The crawler only depends on the [`PageFetcher`] and [`ImageFetcher`]
//! capabilities; [`HttpFetcher`] is the reqwest-backed implementation.

use crate::config::Config;
use reqwest::{Client, Response, StatusCode};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that end a fetch after retries are exhausted
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

impl FetchError {
    /// Returns true if retrying the same request may succeed
    ///
    /// | Condition | Retry |
    /// |-----------|-------|
    /// | HTTP 5xx, 408, 429 | yes |
    /// | Timeout | yes |
    /// | Connection failure | yes |
    /// | Other HTTP status | no |
    /// | Invalid URL | no |
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => StatusCode::from_u16(*status)
                .map(is_retryable_status)
                .unwrap_or(false),
            Self::Timeout { .. } | Self::Network { .. } => true,
            Self::InvalidUrl { .. } => false,
        }
    }
}

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against it
    pub url: Url,
    /// Page body
    pub body: String,
}

/// Capability to fetch a page
pub trait PageFetcher: Send + Sync {
    fn fetch_page(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// Capability to fetch raw image bytes
pub trait ImageFetcher: Send + Sync {
    fn fetch_image(&self, url: &str)
        -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Retry behavior for transient failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

/// reqwest-backed fetcher with retries
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    retry: RetryPolicy,
}

impl HttpFetcher {
    /// Builds a fetcher from the crawler configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self {
            client,
            retry: RetryPolicy {
                max_retries: config.crawler.max_retries,
                delay: Duration::from_millis(config.crawler.retry_delay_ms),
            },
        })
    }

    /// Sends a GET, retrying transient failures per the retry policy
    async fn get_with_retry(&self, url: &str) -> Result<Response, FetchError> {
        let mut attempt = 0;

        loop {
            match get_once(&self.client, url).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    tracing::debug!(
                        "Retrying {} ({}/{}) after: {}",
                        url,
                        attempt,
                        self.retry.max_retries,
                        e
                    );
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.get_with_retry(url).await?;
        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| classify_error(url, e))?;

        Ok(FetchedPage {
            url: final_url,
            body,
        })
    }
}

impl ImageFetcher for HttpFetcher {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get_with_retry(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?;
        Ok(bytes.to_vec())
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed (reqwest's default limit of 10 hops).
///
/// # Example
///
/// ```no_run
/// use shop_crawler::config::Config;
/// use shop_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.crawler.request_timeout_secs);

    Client::builder()
        .user_agent(config.user_agent_string())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10).min(timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a single GET and maps non-success statuses to errors
async fn get_once(client: &Client, url: &str) -> Result<Response, FetchError> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if let Some(status) = error.status() {
        FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// Returns true for statuses the retry policy treats as transient
pub fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
}
