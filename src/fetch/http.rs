//! HTTP Fetcher
//!
//! GETs a URL and returns the response body as text.

use async_trait::async_trait;
use reqwest::Client;

use super::Fetcher;
use crate::error::FetchError;

// == HTTP Fetcher ==
/// Fetcher that treats its key as a URL.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    http_client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a default reqwest client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    type Error = FetchError;

    /// Non-2xx responses are errors, so they are never cached.
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(request_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/conditions.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"foo":"bar"}"#)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new();
        let body = fetcher
            .fetch(&format!("{}/conditions.json", server.url()))
            .await
            .unwrap();

        assert_eq!(body, r#"{"foo":"bar"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new();
        let err = fetcher
            .fetch(&format!("{}/missing", server.url()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_is_request_error() {
        let fetcher = HttpFetcher::new();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }
}
