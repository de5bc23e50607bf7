//! Thunks: async methods on `Store` that call the API and dispatch what happened.
//!
//! Each thunk issues a request (marking its slice pending), awaits the API and dispatches either
//! the fulfilled action or `Action::Rejected` with the normalized error. The caller gets the
//! payload or the same `ErrorData` that was stored on the slice.

mod accounts;
mod insights;
mod resources;
mod session;
mod transactions;
mod transfers;

use crate::api::{handle_error, ApiResult, ErrorData};
use crate::model::AccountId;
use crate::store::{Action, RequestId, RequestKind, Store};
use std::future::Future;

/// The outcome of a thunk.
pub type ThunkResult<T> = std::result::Result<T, ErrorData>;

/// Which page of an account's transactions to fetch. Without an offset (or with offset 0) the
/// feed is replaced, otherwise the page is appended to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub account_id: AccountId,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl TransactionQuery {
    pub fn first_page(account_id: AccountId) -> Self {
        Self {
            account_id,
            offset: None,
            limit: None,
        }
    }

    pub fn is_reset(&self) -> bool {
        self.offset.unwrap_or(0) == 0
    }
}

impl Store {
    /// Runs a single API call as a request of `kind`.
    async fn run<T, F, A>(&self, kind: RequestKind, call: F, fulfilled: A) -> ThunkResult<T>
    where
        T: Clone,
        F: Future<Output = ApiResult<T>>,
        A: FnOnce(RequestId, T) -> Action,
    {
        let request = self.begin(kind);
        let result = call.await;
        self.settle(request, result, fulfilled)
    }

    fn settle<T, A>(&self, request: RequestId, result: ApiResult<T>, fulfilled: A) -> ThunkResult<T>
    where
        T: Clone,
        A: FnOnce(RequestId, T) -> Action,
    {
        match result {
            Ok(value) => {
                self.dispatch(fulfilled(request, value.clone()));
                Ok(value)
            }
            Err(error) => Err(self.reject(request, handle_error(&error))),
        }
    }

    fn reject(&self, request: RequestId, error: ErrorData) -> ErrorData {
        self.dispatch(Action::Rejected(request, error.clone()));
        error
    }
}
