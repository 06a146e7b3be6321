//! HTTP fetcher implementation
//!
//! This module handles page requests for the crawler:
//! - Building the HTTP client with the configured user agent
//! - GET requests to fetch page content
//! - Error classification
//!
//! Any response whose body can be read is a fetched page, error statuses
//! included. Only transport failures are reported as errors, and the caller
//! treats those pages as yielding nothing. Fetches are never retried.

use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered and its body was read, whatever the status
    Fetched {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns whether the fetch produced a page body
    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchResult::Fetched { .. })
    }
}

/// Builds an HTTP client that identifies itself as `user_agent`
///
/// # Example
///
/// ```no_run
/// use sumi_index::crawler::build_http_client;
///
/// let client = build_http_client("SumiIndex").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// # Returns
///
/// The page for any response whose body could be read, otherwise the
/// transport failure
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    let final_url = response.url().to_string();

    match response.text().await {
        Ok(body) => FetchResult::Fetched {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}
