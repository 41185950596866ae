//! GitHub REST API client implementation

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client as HttpClient, Method};
use serde_json::Value;

use super::{JsonResponse, Requester};
use crate::error::{ApiError, ConfigError, Result};

/// GitHub API base URL
pub const API_BASE_URL: &str = "https://api.github.com";

/// Media type requested unless a call overrides `Accept`
const DEFAULT_ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub API client
pub struct GithubClient {
    http: HttpClient,
    base_url: String,
    authenticated: bool,
}

impl GithubClient {
    /// Create a client, optionally authenticated and pointed at another host
    /// (GitHub Enterprise, or a local mock server in tests).
    pub fn new(token: Option<String>, base_url: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ghteam/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));

        let authenticated = token.is_some();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("token {}", token))
                .map_err(|_| ConfigError::Invalid("token contains invalid characters".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = base_url
            .unwrap_or_else(|| API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            base_url,
            authenticated,
        })
    }

    /// Whether requests carry an `Authorization` header
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn absolute(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            url.to_string()
        }
    }
}

impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

/// Decode a response body: empty is `null`, non-JSON text is kept as a string.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl Requester for GithubClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request_json(
        &self,
        method: Method,
        url: &str,
        input: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> Result<JsonResponse> {
        let url = self.absolute(url);
        let mut request = self.http.request(method.clone(), &url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(body) = input {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status().as_u16();
        debug!("{} {} -> {}", method, url, status);

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect::<HashMap<_, _>>();
        let text = response.text().await.map_err(ApiError::from)?;

        Ok(JsonResponse {
            status,
            headers,
            body: decode_body(&text),
        })
    }
}
