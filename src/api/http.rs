//! The `Http` transport trait and its `reqwest` implementation.

use crate::api::{ApiError, ApiResult};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// A request to the finance API. `path` is relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    token: Option<String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a query parameter. `None` values are left out.
    pub fn with_query(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Authenticates the request with `token` instead of the stored session token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Sends requests to the finance API and returns the JSON body of successful responses.
///
/// A non-success status must be reported as `ApiError::Status` carrying the response body, so
/// that `handle_error` can classify it.
#[async_trait]
pub trait Http: Send + Sync {
    async fn send(&self, request: Request) -> ApiResult<Value>;
}

/// Implements `Http` with a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHttp {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(base_url: &str) -> crate::Result<Self> {
        // Without a trailing slash, `Url::join` would replace the last path segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .with_context(|| format!("Invalid base URL '{base_url}'"))?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Transport(format!("invalid request path '{path}': {e}")))
    }
}

#[async_trait]
impl Http for ReqwestHttp {
    async fn send(&self, request: Request) -> ApiResult<Value> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url(&request.path)?);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text)?);
        }

        // Error bodies are kept even when they are not JSON; the normalizer decides what to show.
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
