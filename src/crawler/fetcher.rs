//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with a fixed per-request timeout
//! - GET requests carrying the strategy-selected headers
//! - Error classification (network, timeout, non-success status)
//!
//! There is no retry logic: a failed URL is never requested again.

use crate::config::CrawlerConfig;
use crate::crawler::strategy::RequestHeaders;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Classified fetch failure
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },
}

/// Retrieves the markup behind a URL
pub trait Fetcher {
    /// Fetches `url` with the given headers, returning the response body
    fn fetch(
        &self,
        url: &str,
        headers: &RequestHeaders,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (for the request timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Converts strategy headers into a reqwest header map
pub fn header_map(headers: &RequestHeaders) -> Result<HeaderMap, FetchError> {
    let mut map = HeaderMap::new();

    for (name, value) in headers.pairs() {
        let invalid = |message: String| FetchError::InvalidHeader {
            name: name.to_string(),
            message,
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        map.insert(header_name, header_value);
    }

    Ok(map)
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher using the configured timeout
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if let Some(status) = error.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, headers: &RequestHeaders) -> Result<String, FetchError> {
        let headers = header_map(headers)?;

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| self.classify(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::strategy::{FixedStrategy, RequestStrategy};

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&CrawlerConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_header_map_contains_all_headers() {
        let headers = FixedStrategy::immediate().headers();
        let map = header_map(&headers).unwrap();

        assert_eq!(map.len(), 7);
        assert_eq!(map["user-agent"], headers.user_agent.as_str());
        assert_eq!(map["referer"], "https://www.google.com/");
        assert_eq!(map["dnt"], "1");
        assert_eq!(map["connection"], "keep-alive");
        assert_eq!(map["upgrade-insecure-requests"], "1");
    }

    #[test]
    fn test_header_map_rejects_invalid_value() {
        let mut headers = FixedStrategy::immediate().headers();
        headers.user_agent = "bad\nagent".to_string();
        assert!(matches!(
            header_map(&headers),
            Err(FetchError::InvalidHeader { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let fetcher = HttpFetcher::new(&CrawlerConfig {
            request_timeout_secs: 2,
            ..CrawlerConfig::default()
        })
        .unwrap();
        let headers = FixedStrategy::immediate().headers();

        // Port 9 (discard) on localhost is closed in test environments
        let result = fetcher.fetch("http://127.0.0.1:9/", &headers).await;
        assert!(matches!(
            result,
            Err(FetchError::Network(_)) | Err(FetchError::Timeout(_))
        ));
    }
}
