//! HTTP client trait abstraction.
//!
//! The engine never talks to the network directly: documents and
//! category lists are fetched through an [`HttpClient`], which keeps the
//! transport injectable and mockable in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use thiserror::Error;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, HttpError> {
        String::from_utf8(self.body.to_vec()).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

/// Transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("request timeout: {0}")]
    Timeout(String),

    /// The server answered with a non-2xx status
    #[error("request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// The body could not be decoded (invalid UTF-8 or JSON)
    #[error("could not decode response body: {0}")]
    Decode(String),

    #[error("http error: {0}")]
    Other(String),
}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client (feature
/// `http`) and [`MockHttpClient`](super::mock::MockHttpClient).
///
/// # Example
///
/// ```ignore
/// use venuemap::loader::{HttpClient, Headers};
///
/// async fn fetch_plan<C: HttpClient>(client: &C) -> Result<String, HttpError> {
///     let response = client.get("https://api.example.com/venue/1/image/default.svg", &Headers::new()).await?;
///     response.text()
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    ///
    /// Non-2xx responses are returned as `Ok`; callers decide how to treat
    /// the status. `Err` is reserved for failures below HTTP.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200, Bytes::new()).is_success());
        assert!(Response::new(204, Bytes::new()).is_success());
        assert!(!Response::new(304, Bytes::new()).is_success());
        assert!(!Response::new(404, Bytes::new()).is_success());
        assert!(!Response::new(500, Bytes::new()).is_success());
    }

    #[test]
    fn test_response_text() {
        let response = Response::new(200, "<svg/>");
        assert_eq!(response.text().unwrap(), "<svg/>");

        let invalid = Response::new(200, vec![0xffu8, 0xfe]);
        assert!(matches!(invalid.text(), Err(HttpError::Decode(_))));
    }

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Row {
            id: String,
        }

        let response = Response::new(200, r#"[{"id":"A12"}]"#);
        let rows: Vec<Row> = response.json().unwrap();
        assert_eq!(rows, vec![Row { id: "A12".into() }]);

        let broken = Response::new(200, "{");
        assert!(matches!(broken.json::<Vec<Row>>(), Err(HttpError::Decode(_))));
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::Status { status: 404, url: "http://x/a.svg".into() }.to_string(),
            "request to http://x/a.svg failed with status 404"
        );
        assert_eq!(
            HttpError::ConnectionFailed("refused".into()).to_string(),
            "connection failed: refused"
        );
    }
}
