//! GitHub API client and typed resource bindings
//!
//! The [`Requester`] trait is the HTTP seam: entities only ever talk to the
//! network through it, so tests swap in [`mock::MockRequester`] while the CLI
//! uses [`GithubClient`].

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::{ApiError, Result};

pub mod attribute;
pub mod completion;
#[cfg(test)]
pub mod fixtures;
pub mod github;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod params;

pub use attribute::Attribute;
pub use completion::{Completable, CompletionState};
pub use github::GithubClient;
pub use pagination::{PaginatedList, PaginationParams};

/// Media type for the nested-teams API preview.
///
/// Sent verbatim as the `Accept` header on every team endpoint that touches
/// child teams, memberships or repositories.
pub const NESTED_TEAMS_PREVIEW: &str = "application/vnd.github.hellcat-preview+json";

/// Header slice carrying the nested-teams preview media type
pub const PREVIEW_HEADERS: &[(&str, &str)] = &[("Accept", NESTED_TEAMS_PREVIEW)];

/// A decoded HTTP response
#[derive(Debug, Clone)]
pub struct JsonResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers, keys lowercased
    pub headers: HashMap<String, String>,

    /// Decoded body (`Value::Null` for empty bodies)
    pub body: Value,
}

impl JsonResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-provided error message, falling back to the raw body.
    pub fn message(&self) -> String {
        match &self.body {
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| self.body.to_string()),
            Value::String(s) => s.clone(),
            Value::Null => format!("HTTP {}", self.status),
            other => other.to_string(),
        }
    }

    /// Look up a header case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// HTTP collaborator used by every entity.
///
/// `url` may be absolute or a path starting with `/`, which implementations
/// join onto [`Requester::base_url`].
#[async_trait]
pub trait Requester: Send + Sync {
    /// API root, e.g. `https://api.github.com`
    fn base_url(&self) -> &str;

    /// Issue a request and return whatever status the server answered with.
    ///
    /// Only transport failures produce an error.
    async fn request_json(
        &self,
        method: Method,
        url: &str,
        input: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> Result<JsonResponse>;

    /// Issue a request and fail with [`ApiError`] on any non-2xx status.
    async fn request_json_and_check(
        &self,
        method: Method,
        url: &str,
        input: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> Result<JsonResponse> {
        let response = self.request_json(method, url, input, headers).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(response.status, response.message()).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockRequester;
    use crate::error::Error;
    use serde_json::json;

    fn response(status: u16, body: Value) -> JsonResponse {
        JsonResponse {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    #[test]
    fn test_message_prefers_message_field() {
        let resp = response(404, json!({"message": "Not Found", "documentation_url": "x"}));
        assert_eq!(resp.message(), "Not Found");
    }

    #[test]
    fn test_message_falls_back_to_body() {
        assert_eq!(response(500, json!("boom")).message(), "boom");
        assert_eq!(response(500, Value::Null).message(), "HTTP 500");
        assert_eq!(response(400, json!({"error": 1})).message(), r#"{"error":1}"#);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut resp = response(200, Value::Null);
        resp.headers.insert("link".into(), "<x>; rel=\"next\"".into());
        assert_eq!(resp.header("Link"), Some("<x>; rel=\"next\""));
        assert_eq!(resp.header("etag"), None);
    }

    #[tokio::test]
    async fn test_checked_request_maps_status_to_api_error() {
        let mock = MockRequester::new()
            .respond(Method::GET, "/teams/1", 404, json!({"message": "Not Found"}))
            .await;

        let err = mock
            .request_json_and_check(Method::GET, "/teams/1", None, &[])
            .await
            .unwrap_err();
        match err {
            Error::Api(ApiError::NotFound(msg)) => assert_eq!(msg, "Not Found"),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unchecked_request_returns_any_status() {
        let mock = MockRequester::new()
            .respond(Method::GET, "/teams/1", 404, json!({"message": "Not Found"}))
            .await;

        let resp = mock
            .request_json(Method::GET, "/teams/1", None, &[])
            .await
            .unwrap();
        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
    }
}
