//! HTTP client trait and implementations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::FetchError;

/// Timeout for the reachability probe.
pub const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for downloading a page body.
pub const PAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a HEAD request and require a 2xx answer.
    async fn check_reachable(&self, url: &str) -> Result<(), FetchError>;

    /// Fetch HTML content from a URL.
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// Production client backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; recipebank/0.1)")
            .build()?;
        Ok(Self { inner })
    }
}

fn map_send_error(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout)
    } else {
        FetchError::RequestFailed(err)
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn check_reachable(&self, url: &str) -> Result<(), FetchError> {
        let parsed = super::parse_web_url(url)?;

        tracing::debug!(url, "network: checking reachability");
        let response = self
            .inner
            .head(parsed)
            .timeout(REACHABILITY_TIMEOUT)
            .send()
            .await
            .map_err(|e| map_send_error(e, REACHABILITY_TIMEOUT))?;

        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "network: not reachable");
            return Err(FetchError::Unreachable(response.status().as_u16()));
        }
        Ok(())
    }

    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let parsed = super::parse_web_url(url)?;

        tracing::debug!(url, "network: fetching page");
        let response = self
            .inner
            .get(parsed)
            .timeout(PAGE_FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| map_send_error(e, PAGE_FETCH_TIMEOUT))?;

        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "network: request failed");
            return Err(FetchError::Unreachable(response.status().as_u16()));
        }

        // reqwest decodes using the charset from Content-Type, falling back to UTF-8.
        response
            .text()
            .await
            .map_err(|e| map_send_error(e, PAGE_FETCH_TIMEOUT))
    }
}

/// Mock response for testing.
#[derive(Clone, Debug)]
pub enum MockResponse {
    Html(String),
    /// Reachable, but the body cannot be downloaded.
    ReachableOnly,
    Status(u16),
}

/// Mock HTTP client for testing.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
}

impl MockClient {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for a URL.
    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Add an HTML response for a URL.
    pub fn with_html(self, url: &str, html: &str) -> Self {
        self.with_response(url, MockResponse::Html(html.to_string()))
    }

    fn lookup(&self, url: &str) -> Result<&MockResponse, FetchError> {
        self.responses
            .get(url)
            .ok_or_else(|| FetchError::InvalidUrl(format!("No mock response for URL: {}", url)))
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn check_reachable(&self, url: &str) -> Result<(), FetchError> {
        super::parse_web_url(url)?;
        match self.lookup(url)? {
            MockResponse::Status(status) if !(200..300).contains(status) => {
                Err(FetchError::Unreachable(*status))
            }
            _ => Ok(()),
        }
    }

    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        match self.lookup(url)? {
            MockResponse::Html(html) => Ok(html.clone()),
            MockResponse::ReachableOnly => Err(FetchError::Timeout(PAGE_FETCH_TIMEOUT)),
            MockResponse::Status(status) => Err(FetchError::Unreachable(*status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let client = MockClient::new()
            .with_html("https://example.com/a", "<p>hi</p>")
            .with_response("https://example.com/gone", MockResponse::Status(404));

        assert!(client.check_reachable("https://example.com/a").await.is_ok());
        assert_eq!(
            client.fetch_html("https://example.com/a").await.unwrap(),
            "<p>hi</p>"
        );
        assert!(matches!(
            client.check_reachable("https://example.com/gone").await,
            Err(FetchError::Unreachable(404))
        ));
        assert!(matches!(
            client.check_reachable("https://example.com/other").await,
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
