//! HTTP fetch layer for crawling and sitemap retrieval
//!
//! Wraps a single reqwest client carrying the configured timeout and
//! user agent. The crawler treats failures from [`Fetcher::fetch_page`]
//! as per-page events; the sitemap strategy treats them as fatal.

use reqwest::Client as ReqwestClient;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::config::SpiderConfig;
use crate::error::{Error, Result};

/// A fetched page body plus what the server said it was
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Response body
    pub body: String,
    /// Whether the response declared an HTML content type (an absent
    /// content type counts as HTML, as some static hosts omit it)
    pub is_html: bool,
}

/// HTTP client for page and sitemap retrieval
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: ReqwestClient,
}

impl Fetcher {
    /// Build a client from the discovery configuration
    pub fn new(config: &SpiderConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// GET a URL and return its body as text
    ///
    /// Non-success statuses are errors; the caller decides whether
    /// that aborts the run or just skips the page.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        Ok(self.fetch_page(url).await?.body)
    }

    /// GET a URL, returning the body together with content-type
    /// classification for link-extraction gating
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let is_html = match response.headers().get(CONTENT_TYPE) {
            Some(value) => value
                .to_str()
                .map(|v| v.contains("text/html") || v.contains("xhtml"))
                .unwrap_or(false),
            None => true,
        };

        let body = response.text().await.map_err(|source| Error::Fetch {
            url: url.to_string(),
            source,
        })?;

        Ok(FetchedPage { body, is_html })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SpiderConfig {
        SpiderConfig::builder().request_timeout_secs(5).build()
    }

    #[tokio::test]
    async fn fetches_body_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>hello</html>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = Fetcher::new(&test_config()).unwrap();
        let body = fetcher
            .fetch_text(&format!("{}/page", server.url()))
            .await
            .unwrap();
        assert_eq!(body, "<html>hello</html>");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = Fetcher::new(&test_config()).unwrap();
        let result = fetcher
            .fetch_text(&format!("{}/missing", server.url()))
            .await;
        assert!(matches!(result, Err(Error::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn html_content_type_is_detected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<html></html>")
            .create_async()
            .await;
        server
            .mock("GET", "/data")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let fetcher = Fetcher::new(&test_config()).unwrap();
        let page = fetcher
            .fetch_page(&format!("{}/page", server.url()))
            .await
            .unwrap();
        assert!(page.is_html);

        let data = fetcher
            .fetch_page(&format!("{}/data", server.url()))
            .await
            .unwrap();
        assert!(!data.is_html);
    }

    #[tokio::test]
    async fn missing_content_type_counts_as_html() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/bare")
            .with_status(200)
            .with_body("<html></html>")
            .create_async()
            .await;

        let fetcher = Fetcher::new(&test_config()).unwrap();
        let page = fetcher
            .fetch_page(&format!("{}/bare", server.url()))
            .await
            .unwrap();
        assert!(page.is_html);
    }
}
