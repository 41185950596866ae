//! Mock requester for testing
//!
//! Serves scripted responses keyed by method and path, and records every
//! request so tests can assert on exactly what went over the wire.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{JsonResponse, Requester};
use crate::error::{ApiError, Result};

/// Base URL reported by the mock; absolute URLs under it are matched by path.
pub const MOCK_BASE_URL: &str = "https://api.github.com";

/// Mock requester for testing.
///
/// # Example
/// ```ignore
/// let mock = MockRequester::new()
///     .respond(Method::GET, "/teams/1", 200, json!({"id": 1}))
///     .await;
///
/// let resp = mock.request_json(Method::GET, "/teams/1", None, &[]).await?;
/// assert_eq!(mock.call_count().await, 1);
/// ```
#[derive(Default)]
pub struct MockRequester {
    /// Queued responses per (method, path); the last one is sticky
    responses: Arc<Mutex<HashMap<(Method, String), VecDeque<JsonResponse>>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A captured request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    /// Path relative to [`MOCK_BASE_URL`]
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl CapturedRequest {
    /// Value of a request header, if it was sent
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn normalize(url: &str) -> String {
    url.strip_prefix(MOCK_BASE_URL).unwrap_or(url).to_string()
}

impl MockRequester {
    /// Create a new mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method path`.
    pub async fn respond(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.respond_with_headers(method, path, status, body, &[])
            .await
    }

    /// Queue a response carrying headers (e.g. `Link` for pagination).
    pub async fn respond_with_headers(
        self,
        method: Method,
        path: &str,
        status: u16,
        body: Value,
        headers: &[(&str, &str)],
    ) -> Self {
        let response = JsonResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                .collect(),
            body,
        };
        self.responses
            .lock()
            .await
            .entry((method, normalize(path)))
            .or_default()
            .push_back(response);
        self
    }

    /// Configure a transport error for the next request.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Number of requests issued so far.
    pub async fn call_count(&self) -> usize {
        self.captured_requests.lock().await.len()
    }
}

#[async_trait]
impl Requester for MockRequester {
    fn base_url(&self) -> &str {
        MOCK_BASE_URL
    }

    async fn request_json(
        &self,
        method: Method,
        url: &str,
        input: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> Result<JsonResponse> {
        let path = normalize(url);
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.clone(),
            path: path.clone(),
            body: input.cloned(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        if let Some(err) = self.error.lock().await.take() {
            return Err(err.into());
        }

        let mut responses = self.responses.lock().await;
        let queue = responses
            .get_mut(&(method.clone(), path.clone()))
            .ok_or_else(|| {
                ApiError::InvalidResponse(format!("no mock response for {method} {path}"))
            })?;
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.ok_or_else(|| {
            ApiError::InvalidResponse(format!("no mock response for {method} {path}")).into()
        })
    }
}
