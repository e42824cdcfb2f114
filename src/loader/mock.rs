//! Mock HTTP client for testing.
//!
//! Serves canned responses per URL and records every request so tests
//! can assert on what the engine fetched.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::transport::{Headers, HttpClient, HttpError, Response};

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(HttpError),
}

/// Mock HTTP client for testing.
///
/// Unconfigured URLs answer `404`. Clones share state, so a test can keep
/// a handle while the engine owns another.
///
/// # Example
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.set_body("https://api.example.com/venue/v1/image/default.svg", "<svg/>");
/// let response = client.get("https://api.example.com/venue/v1/image/default.svg", &Headers::new()).await?;
/// assert_eq!(client.requested_urls().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a specific URL (matched exactly).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Shorthand for a `200` response with the given body.
    pub fn set_body(&self, url: &str, body: impl Into<bytes::Bytes>) {
        self.set_response(url, MockResponse::Success(Response::new(200, body)));
    }

    /// URLs requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, _headers: &Headers) -> Result<Response, HttpError> {
        lock(&self.requests).push(url.to_string());

        match lock(&self.responses).get(url).cloned() {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Ok(Response::new(404, bytes::Bytes::new())),
        }
    }
}
