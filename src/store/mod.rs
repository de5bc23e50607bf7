//! The client-side state store.
//!
//! `RootState` is a set of independent slices, each holding server-mirrored data plus a
//! `Status`. The only way to change it is `Store::dispatch`, which runs the root reducer
//! `reduce` under a lock. Thunks (see `thunks`) are async methods on `Store` that call the API
//! and dispatch the outcome. Mutations that touch more than one entity are applied by the
//! functions in `patch`.

mod accounts;
mod balance;
mod insights;
mod patch;
mod resources;
pub mod selectors;
mod snapshot;
mod status;
mod thunks;
mod user;

pub use accounts::AccountsState;
pub use balance::BalanceState;
pub use insights::{InsightsPayload, InsightsState};
pub use resources::{ListPayload, ListRemoval, ListState, Listed};
pub use snapshot::{PersistedAccounts, PersistedState};
pub use status::{InsightKind, ListKind, LoadingState, RequestId, RequestKind, SliceKey, Status};
pub use thunks::{ThunkResult, TransactionQuery};
pub use user::UserState;

use crate::api::ErrorData;
use crate::model::{
    Account, AccountCreated, AccountDeleted, AccountId, Entity, TotalBalance, Transaction,
    TransactionOutcome, TransactionPage, TransferOutcome, User,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Server-mirrored data of one resource plus its request status.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Slice<T> {
    pub data: T,
    pub status: Status,
}

/// The whole client state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RootState {
    pub accounts: AccountsState,
    pub balance: BalanceState,
    pub categories: ListState<crate::model::Category>,
    pub payees: ListState<crate::model::Payee>,
    pub tags: ListState<crate::model::Tag>,
    pub user: UserState,
    pub insights: InsightsState,
}

impl RootState {
    pub fn status(&self, slice: SliceKey) -> &Status {
        match slice {
            SliceKey::Accounts => &self.accounts.status,
            SliceKey::Balance => &self.balance.status,
            SliceKey::Categories => &self.categories.status,
            SliceKey::Payees => &self.payees.status,
            SliceKey::Tags => &self.tags.status,
            SliceKey::User => &self.user.status,
            SliceKey::Insights => &self.insights.status,
        }
    }

    fn status_mut(&mut self, slice: SliceKey) -> &mut Status {
        match slice {
            SliceKey::Accounts => &mut self.accounts.status,
            SliceKey::Balance => &mut self.balance.status,
            SliceKey::Categories => &mut self.categories.status,
            SliceKey::Payees => &mut self.payees.status,
            SliceKey::Tags => &mut self.tags.status,
            SliceKey::User => &mut self.user.status,
            SliceKey::Insights => &mut self.insights.status,
        }
    }

    /// Settles `request` as a success on the slice that tracks it and reports whether its
    /// payload should be applied.
    fn fulfil(&mut self, request: RequestId) -> bool {
        self.status_mut(request.kind.slice()).fulfil(request)
    }
}

/// Everything that can change `RootState`.
///
/// The lifecycle actions (`Pending`, `Rejected` and the fulfilled variants carrying a
/// `RequestId`) are dispatched by thunks. The rest are local edits.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Pending(RequestId),
    Rejected(RequestId, ErrorData),

    AccountsFetched(RequestId, Vec<Account>),
    AccountCreated(RequestId, AccountCreated),
    AccountUpdated(RequestId, Account),
    AccountDeleted(RequestId, AccountDeleted),
    TransactionsFetched {
        request: RequestId,
        account_id: AccountId,
        /// Replace the feed rather than append to it.
        reset: bool,
        page: TransactionPage,
    },
    TransactionCreated(RequestId, TransactionOutcome),
    TransactionUpdated(RequestId, TransactionOutcome),
    TransactionDeleted(RequestId, TransactionOutcome),
    TransferCreated(RequestId, Transaction),
    TransferUpdated(RequestId, TransferOutcome),
    TransferDeleted(RequestId, TransferOutcome),
    TotalBalanceFetched(RequestId, Vec<TotalBalance>),
    ListFetched(RequestId, ListPayload),
    ListCreated(RequestId, ListPayload),
    ListDeleted(RequestId, ListRemoval),
    Authenticated {
        request: RequestId,
        token: String,
        user: User,
    },
    UserFetched(RequestId, User),
    TokenReplaced(RequestId, String),
    InsightsFetched(RequestId, InsightsPayload),

    SetSelectedAccount(Option<AccountId>),
    SetAccounts(Vec<Account>),
    AddAccount(Account),
    RemoveAccount(AccountId),
    SetList(ListPayload),
    AddToList(ListPayload),
    RemoveFromList(ListRemoval),
    ClearUser,
    /// Resets every slice.
    ClearAll,
    /// Replaces the persisted slices with a saved snapshot.
    Restore {
        snapshot: Box<PersistedState>,
        token: Option<String>,
    },
}

/// The root reducer. Every change to `RootState` goes through here.
pub fn reduce(state: &mut RootState, action: Action) {
    match action {
        Action::Pending(request) => state.status_mut(request.kind.slice()).begin(request),
        Action::Rejected(request, error) => {
            state.status_mut(request.kind.slice()).fail(request, error)
        }

        Action::AccountsFetched(request, accounts) => {
            if state.fulfil(request) {
                state.accounts.set_accounts(accounts);
            }
        }
        Action::AccountCreated(request, created) => {
            if state.fulfil(request) {
                patch::account_created(state, created);
            }
        }
        Action::AccountUpdated(request, account) => {
            if state.fulfil(request) {
                state.accounts.upsert_account(account);
            }
        }
        Action::AccountDeleted(request, deleted) => {
            if state.fulfil(request) {
                patch::account_deleted(state, deleted);
            }
        }
        Action::TransactionsFetched {
            request,
            account_id,
            reset,
            page,
        } => {
            if state.fulfil(request) {
                state.accounts.apply_page(&account_id, reset, page);
            }
        }
        Action::TransactionCreated(request, outcome) => {
            if state.fulfil(request) {
                patch::transaction_created(state, outcome);
            }
        }
        Action::TransactionUpdated(request, outcome) => {
            if state.fulfil(request) {
                patch::transaction_updated(state, outcome);
            }
        }
        Action::TransactionDeleted(request, outcome) => {
            if state.fulfil(request) {
                patch::transaction_deleted(state, outcome);
            }
        }
        Action::TransferCreated(request, transaction) => {
            if state.fulfil(request) {
                patch::transfer_created(state, transaction);
            }
        }
        Action::TransferUpdated(request, outcome) => {
            if state.fulfil(request) {
                patch::transfer_updated(state, outcome);
            }
        }
        Action::TransferDeleted(request, outcome) => {
            if state.fulfil(request) {
                patch::transfer_deleted(state, outcome);
            }
        }
        Action::TotalBalanceFetched(request, rows) => {
            if state.fulfil(request) {
                balance::set_rows(&mut state.balance, rows);
            }
        }
        Action::ListFetched(request, payload) => {
            if state.fulfil(request) {
                state.set_list(payload);
            }
        }
        Action::ListCreated(request, payload) => {
            if state.fulfil(request) {
                state.add_to_list(payload);
            }
        }
        Action::ListDeleted(request, removal) => {
            if state.fulfil(request) {
                state.remove_from_list(&removal);
            }
        }
        Action::Authenticated {
            request,
            token,
            user,
        } => {
            if state.fulfil(request) {
                state.user.sign_in(token, user);
            }
        }
        Action::UserFetched(request, user) => {
            if state.fulfil(request) {
                state.user.user = Some(user);
            }
        }
        Action::TokenReplaced(request, token) => {
            if state.fulfil(request) {
                state.user.token = Some(token);
            }
        }
        Action::InsightsFetched(request, payload) => {
            if state.fulfil(request) {
                state.insights.apply(payload);
            }
        }

        Action::SetSelectedAccount(account_id) => state.accounts.select(account_id),
        Action::SetAccounts(accounts) => state.accounts.set_accounts(accounts),
        Action::AddAccount(account) => state.accounts.upsert_account(account),
        Action::RemoveAccount(account_id) => {
            state.accounts.remove_account(&account_id);
        }
        Action::SetList(payload) => state.set_list(payload),
        Action::AddToList(payload) => state.add_to_list(payload),
        Action::RemoveFromList(removal) => state.remove_from_list(&removal),
        Action::ClearUser => state.user = UserState::default(),
        Action::ClearAll => *state = RootState::default(),
        Action::Restore { snapshot, token } => snapshot.restore(state, token),
    }
}

/// Replaces the item with the same id, or appends `item` if there is none.
pub(crate) fn upsert_by_id<T>(items: &mut Vec<T>, item: T)
where
    T: Entity,
{
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

/// Removes and returns the item with `id`.
pub(crate) fn remove_by_id<T>(items: &mut Vec<T>, id: &T::Id) -> Option<T>
where
    T: Entity,
{
    let index = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(index))
}

/// A cloneable handle to the shared `RootState`.
///
/// The lock is only ever held while a reducer runs, never across an `.await`, so thunks running
/// concurrently on the same store cannot deadlock.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<Mutex<RootState>>,
    seq: Arc<AtomicU64>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: RootState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Runs `action` through the root reducer.
    pub fn dispatch(&self, action: Action) {
        debug!("Dispatching {}", action_name(&action));
        reduce(&mut self.lock(), action);
    }

    /// A copy of the current state.
    pub fn state(&self) -> RootState {
        self.lock().clone()
    }

    /// Reads from the current state without copying all of it.
    pub fn select<T, F>(&self, selector: F) -> T
    where
        F: FnOnce(&RootState) -> T,
    {
        selector(&self.lock())
    }

    /// Issues a new request of `kind` and marks its slice as pending.
    pub(crate) fn begin(&self, kind: RequestKind) -> RequestId {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let request = RequestId { kind, seq };
        self.dispatch(Action::Pending(request));
        request
    }

    fn lock(&self) -> MutexGuard<'_, RootState> {
        // A panicking reducer leaves the state as it was before the action, or partly patched.
        // Either way it is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn action_name(action: &Action) -> String {
    let name = match action {
        Action::Pending(request) => return format!("Pending({:?})", request.kind),
        Action::Rejected(request, error) => {
            return format!("Rejected({:?}, {error})", request.kind)
        }
        Action::AccountsFetched(..) => "AccountsFetched",
        Action::AccountCreated(..) => "AccountCreated",
        Action::AccountUpdated(..) => "AccountUpdated",
        Action::AccountDeleted(..) => "AccountDeleted",
        Action::TransactionsFetched { .. } => "TransactionsFetched",
        Action::TransactionCreated(..) => "TransactionCreated",
        Action::TransactionUpdated(..) => "TransactionUpdated",
        Action::TransactionDeleted(..) => "TransactionDeleted",
        Action::TransferCreated(..) => "TransferCreated",
        Action::TransferUpdated(..) => "TransferUpdated",
        Action::TransferDeleted(..) => "TransferDeleted",
        Action::TotalBalanceFetched(..) => "TotalBalanceFetched",
        Action::ListFetched(..) => "ListFetched",
        Action::ListCreated(..) => "ListCreated",
        Action::ListDeleted(..) => "ListDeleted",
        Action::Authenticated { .. } => "Authenticated",
        Action::UserFetched(..) => "UserFetched",
        Action::TokenReplaced(..) => "TokenReplaced",
        Action::InsightsFetched(_, payload) => {
            return format!("InsightsFetched({:?})", payload.kind())
        }
        Action::SetSelectedAccount(_) => "SetSelectedAccount",
        Action::SetAccounts(_) => "SetAccounts",
        Action::AddAccount(_) => "AddAccount",
        Action::RemoveAccount(_) => "RemoveAccount",
        Action::SetList(_) => "SetList",
        Action::AddToList(_) => "AddToList",
        Action::RemoveFromList(_) => "RemoveFromList",
        Action::ClearUser => "ClearUser",
        Action::ClearAll => "ClearAll",
        Action::Restore { .. } => "Restore",
    };
    name.to_string()
}
