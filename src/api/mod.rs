//! A typed client for the finance API.
//!
//! `Http` is the transport seam: `ReqwestHttp` talks to the real server, `TestHttp` (tests only)
//! serves scripted responses. `Api` sits on top of a transport, injects the bearer token held by
//! the `TokenStore`, and exposes one method per endpoint. The endpoint methods live next to the
//! resource they serve, e.g. `accounts.rs`.

mod accounts;
mod error;
mod http;
mod insights;
mod resources;
#[cfg(test)]
mod test_http;
mod transactions;
mod user;

pub use error::{handle_error, ApiError, ErrorData, DEFAULT_ERROR_MESSAGE};
pub use http::{Http, ReqwestHttp, Request};
#[cfg(test)]
pub(crate) use test_http::TestHttp;

use crate::session::TokenStore;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::trace;

/// The result of a single API call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Issues typed requests to the finance API over a dynamically-dispatched `Http` transport.
#[derive(Clone)]
pub struct Api {
    http: Arc<dyn Http>,
    tokens: TokenStore,
}

impl Debug for Api {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl Api {
    /// Create a new `Api` that sends requests through `http` and authenticates them with the
    /// token held by `tokens`.
    pub fn new(http: Arc<dyn Http>, tokens: TokenStore) -> Self {
        Self { http, tokens }
    }

    /// Create a new `Api` that talks to the server at `base_url`.
    pub fn connect(base_url: &str, tokens: TokenStore) -> crate::Result<Self> {
        Ok(Self::new(Arc::new(ReqwestHttp::new(base_url)?), tokens))
    }

    /// The store holding the session token.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Sends `request` with the stored token attached, unless the request already carries one,
    /// and decodes the response body into `T`.
    async fn call<T>(&self, request: Request) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let request = match (request.token(), self.tokens.token()) {
            (None, Some(token)) => request.with_token(token),
            _ => request,
        };
        trace!("{} {}", request.method(), request.path());
        let body = self.http.send(request).await?;
        Ok(serde_json::from_value(body)?)
    }
}
