//! Shared HTTP plumbing for all backend endpoints.
//!
//! One [`reqwest::Client`] is reused across every call (connection
//! pooling); the bearer header is attached from the session store when
//! a session exists. Non-2xx responses are turned into
//! [`ApiError::Api`] with the backend's message extracted verbatim.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use stockdeck_store::SessionStore;

use crate::error::{ApiError, ApiResult};

/// Default per-request timeout. A hung request must not leave callers
/// waiting indefinitely.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the inventory backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client for the backend at `base_url` (e.g.
    /// `http://localhost:8080`), with the default request timeout.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> ApiResult<Self> {
        Self::with_timeout(base_url, session, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            session,
        })
    }

    /// Build the absolute URL for an API path like `products/all`.
    pub(crate) fn url(&self, path: &str) -> String {
        join_api_url(&self.base_url, path)
    }

    /// Start a request, attaching `Authorization: Bearer <token>` when a
    /// session exists.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.session.get_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// `GET` a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Self::parse_json(response).await
    }

    /// `POST` a JSON body, expecting a JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::parse_json(response).await
    }

    /// `PUT` a JSON body, expecting a JSON response.
    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::parse_json(response).await
    }

    /// `POST` with no body (sub-actions like `transfers/{id}/complete`),
    /// expecting a JSON response.
    pub(crate) async fn post_action<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.request(Method::POST, path).send().await?;
        Self::parse_json(response).await
    }

    /// `DELETE` a resource; the response body is discarded.
    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check_status(response).await
    }

    /// Parse a 2xx JSON body, or extract the error message.
    async fn parse_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        Err(Self::error_from(status.as_u16(), response).await)
    }

    /// Require a 2xx status, discarding the body.
    async fn check_status(response: Response) -> ApiResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from(status.as_u16(), response).await)
    }

    /// Build an [`ApiError::Api`] from a non-2xx response, pulling the
    /// message from a JSON `message`/`error` field when present, else
    /// the raw body text.
    async fn error_from(status: u16, response: Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);
        tracing::debug!(status, message = %message, "Backend rejected request");
        ApiError::Api { status, message }
    }
}

/// Join a base URL and an `api/`-relative path without doubling slashes.
pub(crate) fn join_api_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/api/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Pull a human-readable message out of an error body. JSON bodies with
/// a `message` or `error` string field win; anything else is surfaced
/// verbatim.
pub(crate) fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }
    }
    if body.is_empty() {
        "Request failed".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joining_handles_trailing_and_leading_slashes() {
        assert_eq!(
            join_api_url("http://localhost:8080", "products/all"),
            "http://localhost:8080/api/products/all"
        );
        assert_eq!(
            join_api_url("http://localhost:8080/", "/products/all"),
            "http://localhost:8080/api/products/all"
        );
    }

    #[test]
    fn error_message_prefers_json_message_field() {
        assert_eq!(
            extract_error_message(r#"{"message":"Capacity too low","code":"VALIDATION"}"#),
            "Capacity too low"
        );
        assert_eq!(
            extract_error_message(r#"{"error":"Invalid token"}"#),
            "Invalid token"
        );
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(extract_error_message("plain text failure"), "plain text failure");
        assert_eq!(extract_error_message(""), "Request failed");
        // JSON without a recognised field passes through verbatim.
        assert_eq!(
            extract_error_message(r#"{"detail":"oops"}"#),
            r#"{"detail":"oops"}"#
        );
    }
}
