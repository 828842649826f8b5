//! HTTP fetcher for downloading source lists.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::error::FetchError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY_MS: u64 = 2000;

/// Maximum size per list (32 MB)
/// Large hosts compilations are ~5 MB, so this leaves ample margin
const MAX_LIST_SIZE: usize = 32 * 1024 * 1024;

/// Maximum total size for all downloads combined (256 MB)
const MAX_TOTAL_SIZE: usize = 256 * 1024 * 1024;

/// Source of raw list content.
///
/// Any error is surfaced to aggregation as a plain failure; callers do not
/// distinguish timeouts from HTTP errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch the body at `url` as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher with retry and size limits
pub struct HttpFetcher {
    client: Client,
    /// Cumulative download size tracker (shared by concurrent fetches)
    total_downloaded: AtomicUsize,
    retry_delay: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout and User-Agent
    pub fn new() -> Result<Self> {
        Self::with_options(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            &format!("hostmerge/{}", env!("CARGO_PKG_VERSION")),
        )
    }

    /// Create a fetcher with a custom timeout and User-Agent
    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            total_downloaded: AtomicUsize::new(0),
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        })
    }

    /// Override the base delay between attempts (doubles on each retry)
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Get the total bytes downloaded so far
    pub fn total_downloaded(&self) -> usize {
        self.total_downloaded.load(Ordering::Relaxed)
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt + 1 < MAX_ATTEMPTS => {
                    let delay = self.retry_delay * (1 << attempt);
                    attempt += 1;
                    debug!("Retry {} after {:?} for {}: {}", attempt, delay, url, e);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Reject a response up front from its Content-Length header
    fn check_declared_size(&self, url: &str, content_length: u64) -> Result<(), FetchError> {
        // Saturate so an oversized header still trips the limit on 32-bit targets
        let content_length = usize::try_from(content_length).unwrap_or(usize::MAX);
        if content_length > MAX_LIST_SIZE {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                size: content_length,
                max: MAX_LIST_SIZE,
            });
        }
        let current_total = self.total_downloaded.load(Ordering::Relaxed);
        if current_total + content_length > MAX_TOTAL_SIZE {
            return Err(FetchError::BudgetExceeded {
                total: current_total + content_length,
                max: MAX_TOTAL_SIZE,
            });
        }
        Ok(())
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_length) = response.content_length() {
            self.check_declared_size(url, content_length)?;
        }

        let body = response.text().await.map_err(request_error)?;

        // Double-check actual size after download
        if body.len() > MAX_LIST_SIZE {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                size: body.len(),
                max: MAX_LIST_SIZE,
            });
        }

        let new_total = self
            .total_downloaded
            .fetch_add(body.len(), Ordering::Relaxed)
            + body.len();
        if new_total > MAX_TOTAL_SIZE {
            return Err(FetchError::BudgetExceeded {
                total: new_total,
                max: MAX_TOTAL_SIZE,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetch_with_retry(url).await
    }
}

// Note: Default is intentionally not implemented for HttpFetcher
// because new() can fail and we want explicit error handling.
