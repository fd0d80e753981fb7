// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON HTTP client with per-attempt timeout and linear backoff.
//!
//! Every attempt runs under its own timer; the attempt is dropped (and the
//! connection cancelled) when the timer fires. Any failure before the last
//! attempt waits `backoff_step * (attempt + 1)` and tries again. The last
//! attempt's error is returned unchanged.

use crate::time_utils::{Delay, TokioDelay};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Retry and timeout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub retries: u32,
    /// Budget for a single attempt
    pub timeout: Duration,
    /// Wait after the first failure; grows linearly per attempt
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            timeout: Duration::from_secs(10),
            backoff_step: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Wait after the failed attempt with this zero-based index.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_step * (attempt + 1)
    }
}

/// Transport-level failure of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Invalid JSON response: {0}")]
    Decode(String),
}

/// Per-request options merged over the client defaults.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Extra headers; these override the default JSON content type
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP client rooted at a base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    policy: RetryPolicy,
    delay: Arc<dyn Delay>,
}

impl ApiClient {
    /// Client with the default policy (3 attempts, 10 s timeout, 1 s step).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            policy: RetryPolicy::default(),
            delay: Arc::new(TokioDelay),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the backoff wait (tests use a non-sleeping delay).
    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Send a request to `base_url + endpoint` and decode the JSON reply.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let headers = merge_headers(&options.headers)?;
        let attempts = self.policy.retries.max(1);

        let mut attempt = 0;
        loop {
            let result = self
                .attempt(&url, &options.method, &headers, options.body.as_ref())
                .await;

            match result {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::info!(url = %url, attempt = attempt + 1, "Request succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if attempt + 1 >= attempts => {
                    tracing::warn!(url = %url, attempts, error = %e, "Request failed, retries exhausted");
                    return Err(e);
                }
                Err(e) => {
                    let backoff = self.policy.backoff_for(attempt);
                    tracing::warn!(
                        url = %url,
                        attempt = attempt + 1,
                        attempts,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "Request failed, retrying"
                    );
                    self.delay.sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }

    /// GET `endpoint`.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(endpoint, RequestOptions::default()).await
    }

    /// POST `data` as JSON to `endpoint`.
    pub async fn post<B, T>(&self, endpoint: &str, data: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body =
            serde_json::to_value(data).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let options = RequestOptions {
            method: Method::POST,
            body: Some(body),
            ..RequestOptions::default()
        };
        self.request(endpoint, options).await
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        url: &str,
        method: &Method,
        headers: &HeaderMap,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        let mut builder = self
            .http
            .request(method.clone(), url)
            .headers(headers.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let call = async {
            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Status(status.as_u16()));
            }

            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        };

        tokio::time::timeout(self.policy.timeout, call)
            .await
            .map_err(|_| ApiError::Timeout(self.policy.timeout))?
    }
}

/// Default JSON content type, then caller headers on top.
fn merge_headers(extra: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::InvalidRequest(format!("header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::InvalidRequest(format!("header value {:?}: {}", value, e)))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retries, 3);
        assert_eq!(policy.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_backoff_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(0), Duration::from_secs(1));
        assert_eq!(policy.backoff_for(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(3));
    }

    #[test]
    fn test_caller_headers_override_defaults() {
        let headers = merge_headers(&[
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("X-Trace".to_string(), "abc".to_string()),
        ])
        .unwrap();

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(headers.get("x-trace").unwrap(), "abc");
    }

    #[test]
    fn test_invalid_header_name_is_rejected() {
        let err = merge_headers(&[("bad header".to_string(), "x".to_string())]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_status_error_message_embeds_code() {
        assert_eq!(ApiError::Status(503).to_string(), "HTTP error! status: 503");
    }
}
