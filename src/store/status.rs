//! Loading state and request generations shared by every slice.

use crate::api::ErrorData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Where a slice is in its request lifecycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

serde_plain::derive_display_from_serialize!(LoadingState);

/// The three named lists that share one slice shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Categories,
    Payees,
    Tags,
}

serde_plain::derive_display_from_serialize!(ListKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InsightKind {
    BalanceTrend,
    Overview,
    Statistics,
    Recent,
}

/// Identifies the slices of `RootState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SliceKey {
    Accounts,
    Balance,
    Categories,
    Payees,
    Tags,
    User,
    Insights,
}

/// Every kind of request a thunk can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RequestKind {
    FetchAccounts,
    CreateAccount,
    UpdateAccount,
    DeleteAccount,
    FetchTransactions,
    CreateTransaction,
    UpdateTransaction,
    DeleteTransaction,
    CreateTransfer,
    UpdateTransfer,
    DeleteTransfer,
    FetchTotalBalance,
    FetchList(ListKind),
    CreateList(ListKind),
    DeleteList(ListKind),
    Login,
    SignUp,
    FetchUser,
    ChangePassword,
    FetchInsights(InsightKind),
}

impl RequestKind {
    /// The slice whose status tracks this kind of request.
    pub fn slice(self) -> SliceKey {
        match self {
            RequestKind::FetchAccounts
            | RequestKind::CreateAccount
            | RequestKind::UpdateAccount
            | RequestKind::DeleteAccount
            | RequestKind::FetchTransactions
            | RequestKind::CreateTransaction
            | RequestKind::UpdateTransaction
            | RequestKind::DeleteTransaction
            | RequestKind::CreateTransfer
            | RequestKind::UpdateTransfer
            | RequestKind::DeleteTransfer => SliceKey::Accounts,
            RequestKind::FetchTotalBalance => SliceKey::Balance,
            RequestKind::FetchList(list)
            | RequestKind::CreateList(list)
            | RequestKind::DeleteList(list) => match list {
                ListKind::Categories => SliceKey::Categories,
                ListKind::Payees => SliceKey::Payees,
                ListKind::Tags => SliceKey::Tags,
            },
            RequestKind::Login
            | RequestKind::SignUp
            | RequestKind::FetchUser
            | RequestKind::ChangePassword => SliceKey::User,
            RequestKind::FetchInsights(_) => SliceKey::Insights,
        }
    }

    /// Fetches replace data wholesale, so a response that was overtaken by a newer request of
    /// the same kind carries nothing worth keeping.
    pub fn is_fetch(self) -> bool {
        matches!(
            self,
            RequestKind::FetchAccounts
                | RequestKind::FetchTransactions
                | RequestKind::FetchTotalBalance
                | RequestKind::FetchList(_)
                | RequestKind::FetchUser
                | RequestKind::FetchInsights(_)
        )
    }
}

/// One issued request. `seq` grows with every request the store issues, so of two requests of
/// the same kind, the one issued later has the greater `seq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId {
    pub kind: RequestKind,
    pub seq: u64,
}

/// Loading flag and last error of a slice, plus the latest request issued per kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Status {
    pub loading: LoadingState,
    pub error: Option<ErrorData>,
    latest: BTreeMap<RequestKind, u64>,
}

impl Status {
    pub fn is_loading(&self) -> bool {
        self.loading == LoadingState::Pending
    }

    /// Whether `request` is the most recently issued request of its kind.
    pub fn is_current(&self, request: RequestId) -> bool {
        self.latest.get(&request.kind) == Some(&request.seq)
    }

    pub(crate) fn begin(&mut self, request: RequestId) {
        self.latest.insert(request.kind, request.seq);
        self.loading = LoadingState::Pending;
    }

    /// Settles a successful `request` and returns whether its payload should be applied.
    ///
    /// Loading and error only change for the current request. A superseded mutation is still
    /// applied since its payload is server truth; a superseded fetch is dropped. So is any
    /// response to a kind this status has no record of, i.e. one issued before a reset.
    pub(crate) fn fulfil(&mut self, request: RequestId) -> bool {
        if self.is_current(request) {
            self.loading = LoadingState::Succeeded;
            self.error = None;
            return true;
        }
        if !self.latest.contains_key(&request.kind) {
            debug!("Dropping response to {:?} issued before a reset", request);
            return false;
        }
        if request.kind.is_fetch() {
            debug!("Dropping stale response to {:?}", request);
            return false;
        }
        true
    }

    pub(crate) fn fail(&mut self, request: RequestId, error: ErrorData) {
        if !self.is_current(request) {
            debug!("Ignoring stale failure of {:?}: {error}", request);
            return;
        }
        self.loading = LoadingState::Failed;
        self.error = Some(error);
    }
}
