//! Error types for hostmerge.

use thiserror::Error;

/// Failure to retrieve a source list.
///
/// Aggregation treats every variant the same way: the source is recorded
/// as `fetch_failed` and the run continues.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response from {url} too large: {size} bytes (max: {max} bytes)")]
    TooLarge { url: String, size: usize, max: usize },

    #[error("Cumulative download limit exceeded: {total} bytes (max: {max} bytes)")]
    BudgetExceeded { total: usize, max: usize },
}

impl FetchError {
    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            FetchError::Request { .. } => true,
            FetchError::TooLarge { .. } | FetchError::BudgetExceeded { .. } => false,
        }
    }
}
