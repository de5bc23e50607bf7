//! Shared test utilities: entity builders, JSON fixtures shaped like server responses, and a
//! test environment with a pocketbook home directory.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::api::{Api, TestHttp};
use crate::commands::Context;
use crate::model::{
    Account, AccountId, Amount, Currency, Tag, TagId, TotalBalance, Transaction, TransactionId,
    TransactionPage, TransactionType, User, UserId,
};
use crate::session::TokenStore;
use crate::Config;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;

pub fn amount(s: &str) -> Amount {
    Amount::from_str(s).unwrap()
}

/// Noon on the given day of May 2024.
pub fn date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
}

/// A USD debit account named `Account {id}`.
pub fn account(id: &str, balance: &str) -> Account {
    Account {
        id: AccountId::new(id),
        name: format!("Account {id}"),
        balance: amount(balance),
        currency: Currency::Usd,
        is_credit: false,
        icon: String::new(),
        created_at: None,
        updated_at: None,
    }
}

pub fn account_json(id: &str, balance: &str) -> Value {
    serde_json::to_value(account(id, balance)).unwrap()
}

pub fn tag(id: &str, name: &str) -> Tag {
    Tag {
        id: TagId::new(id),
        name: name.to_string(),
    }
}

pub fn total(year: i32, month: u32, balance: &str) -> TotalBalance {
    TotalBalance {
        month,
        year,
        currency: Currency::Usd,
        balance: amount(balance),
    }
}

pub fn user(username: &str) -> User {
    User {
        id: UserId::new(format!("id-{username}")),
        email: format!("{username}@example.com"),
        username: username.to_string(),
        role: Default::default(),
    }
}

pub fn user_json(username: &str) -> Value {
    serde_json::to_value(user(username)).unwrap()
}

pub fn withdrawal(id: &str, account: &str, value: &str, day: u32) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        amount: amount(value),
        kind: TransactionType::Withdrawal,
        from_account_id: AccountId::new(account),
        to_account_id: None,
        converted_amount: None,
        category_id: None,
        payee_id: None,
        tags: Vec::new(),
        date: date(day),
        description: String::new(),
    }
}

pub fn transfer(
    id: &str,
    from: &str,
    to: &str,
    value: &str,
    converted: Option<&str>,
    day: u32,
) -> Transaction {
    Transaction {
        kind: TransactionType::Transfer,
        to_account_id: Some(AccountId::new(to)),
        converted_amount: converted.map(amount),
        ..withdrawal(id, from, value, day)
    }
}

pub fn transaction_json(id: &str, account: &str, value: &str, day: u32) -> Value {
    serde_json::to_value(withdrawal(id, account, value, day)).unwrap()
}

pub fn transfer_json(
    id: &str,
    from: &str,
    to: &str,
    value: &str,
    converted: Option<&str>,
) -> Value {
    serde_json::to_value(transfer(id, from, to, value, converted, 3)).unwrap()
}

pub fn page(transactions: Vec<Transaction>, count: u64) -> TransactionPage {
    TransactionPage {
        transactions,
        offset: None,
        limit: None,
        count: Some(count),
    }
}

/// An `Api` backed by `http` whose token lives only in memory.
pub fn api(http: &Arc<TestHttp>) -> Api {
    Api::new(http.clone(), TokenStore::in_memory())
}

/// Test environment that sets up a pocketbook home directory with Config and database.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
    http: Arc<TestHttp>,
}

impl TestEnv {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("pocketbook");
        let config = Config::create(&root, "http://localhost:4000")
            .await
            .unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
            http: TestHttp::new(),
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// The scripted server shared by every context of this environment.
    pub fn http(&self) -> &Arc<TestHttp> {
        &self.http
    }

    /// A fresh context, as a new CLI invocation would open it: the token file and the saved
    /// snapshot are read back from the home directory.
    pub async fn context(&self) -> Context {
        let tokens = TokenStore::load(self.config.token_path()).await.unwrap();
        Context::with_api(self.config(), Api::new(self.http.clone(), tokens))
            .await
            .unwrap()
    }
}
