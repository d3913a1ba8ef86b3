//! Page fetching
//!
//! Scraping goes through the [`PageFetcher`] trait so the HTTP transport
//! can be swapped. Two implementations:
//! - `HttpFetcher`: `reqwest` client (production)
//! - `StaticFetcher`: canned pages keyed by URL (testing)

use super::SourceError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Why a page could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP status {status}")]
    Status { status: u16 },
}

/// Retrieves the HTML of a page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url`, optionally with query parameters
    async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError>;
}

/// `reqwest`-backed fetcher
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tagnet/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        resp.text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

/// Fetcher serving preconfigured pages
///
/// Query parameters are appended to the key as `url?k=v&k2=v2` (unencoded).
/// Unknown URLs fail with a network error.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Result<String, FetchError>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body served for a URL
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Ok(html.into()));
        self
    }

    /// Register a failure for a URL
    pub fn with_failure(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.pages.insert(url.into(), Err(error));
        self
    }

    fn key(url: &str, query: &[(&str, &str)]) -> String {
        if query.is_empty() {
            return url.to_string();
        }
        let params: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{}?{}", url, params.join("&"))
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let key = Self::key(url, query);
        match self.pages.get(&key) {
            Some(result) => result.clone(),
            None => Err(FetchError::Network(format!("no page registered for {}", key))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_fetcher_serves_registered_pages() {
        let fetcher = StaticFetcher::new()
            .with_page("https://example.org/search?q=comfort", "<html>hit</html>")
            .with_failure("https://example.org/down", FetchError::Status { status: 503 });

        let body = fetcher
            .fetch("https://example.org/search", &[("q", "comfort")])
            .await
            .unwrap();
        assert_eq!(body, "<html>hit</html>");

        let err = fetcher.fetch("https://example.org/down", &[]).await.unwrap_err();
        assert_eq!(err, FetchError::Status { status: 503 });

        let err = fetcher.fetch("https://example.org/missing", &[]).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn http_fetcher_builds() {
        assert!(HttpFetcher::new(Duration::from_secs(5)).is_ok());
    }
}
