//! Implements the `Http` trait with scripted, in-memory responses for testing purposes.

use crate::api::{ApiError, ApiResult, Http, Request};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A scripted response. A gated response is held back until its gate is notified, which lets a
/// test decide the order in which overlapping requests complete.
struct Scripted {
    result: Result<Value, (u16, Value)>,
    gate: Option<Arc<Notify>>,
}

/// An implementation of the `Http` trait that does not use the network. Responses are queued per
/// method and path and served first-in, first-out. Every request is recorded.
#[derive(Default)]
pub(crate) struct TestHttp {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<Request>>,
}

impl TestHttp {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful response with `body` for `method path`.
    pub(crate) fn respond(&self, method: Method, path: &str, body: Value) {
        self.push(method, path, Ok(body), None);
    }

    /// Queue a successful response that is only delivered after `gate` is notified.
    pub(crate) fn respond_gated(&self, method: Method, path: &str, body: Value, gate: Arc<Notify>) {
        self.push(method, path, Ok(body), Some(gate));
    }

    /// Queue an error response with `status` and `body` for `method path`.
    pub(crate) fn fail(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(method, path, Err((status, body)), None);
    }

    /// All requests received so far, in order.
    pub(crate) fn requests(&self) -> Vec<Request> {
        lock(&self.requests).clone()
    }

    fn push(
        &self,
        method: Method,
        path: &str,
        result: Result<Value, (u16, Value)>,
        gate: Option<Arc<Notify>>,
    ) {
        lock(&self.routes)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(Scripted { result, gate });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl Http for TestHttp {
    async fn send(&self, request: Request) -> ApiResult<Value> {
        let key = (request.method().clone(), request.path().to_string());
        lock(&self.requests).push(request);

        let scripted = lock(&self.routes)
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| {
                ApiError::Transport(format!("no response scripted for {} {}", key.0, key.1))
            })?;

        if let Some(gate) = scripted.gate {
            gate.notified().await;
        }

        scripted
            .result
            .map_err(|(status, body)| ApiError::Status { status, body })
    }
}
