//! Command handlers for the pocketbook CLI.
//!
//! Each handler opens a `Context` (which restores the saved snapshot into a fresh `Store`), runs
//! one or more thunks, saves the snapshot and returns an `Out` for `main` to print.

mod accounts;
mod auth;
mod init;
mod insights;
mod lists;
mod transactions;

use crate::api::Api;
use crate::session::TokenStore;
use crate::store::{Action, PersistedState, Store};
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use accounts::{
    account_create, account_delete, account_select, account_update, accounts_list,
};
pub use auth::{login, logout, password, signup, whoami};
pub use init::init;
pub use insights::insights;
pub use lists::named_list;
pub use transactions::{
    transaction_create, transaction_delete, transaction_update, transactions_list,
    transfer_create, transfer_delete, transfer_update,
};

/// The output type for a command: a message for the user and, optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Everything a command needs: the configuration, an API client holding the session token, and
/// a store restored from the last saved snapshot.
#[derive(Debug, Clone)]
pub struct Context {
    config: Config,
    api: Api,
    store: Store,
}

impl Context {
    /// Connects to the configured server with the saved session token.
    pub async fn open(config: Config) -> Result<Self> {
        let tokens = TokenStore::load(config.token_path()).await?;
        let api = Api::connect(&config.base_url(), tokens)?;
        Self::with_api(config, api).await
    }

    pub(crate) async fn with_api(config: Config, api: Api) -> Result<Self> {
        let snapshot = config.db().load_snapshot().await?.unwrap_or_default();
        let store = Store::new();
        store.dispatch(Action::Restore {
            snapshot: Box::new(snapshot),
            token: api.tokens().token(),
        });
        Ok(Self { config, api, store })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Saves the persisted slices of the store.
    pub async fn save(&self) -> Result<()> {
        let snapshot = self.store.select(PersistedState::capture);
        self.config.db().save_snapshot(&snapshot).await
    }

    /// Saves the snapshot and hands back `out`, so that handlers can end with it.
    async fn finish<T>(&self, out: Out<T>) -> Result<Out<T>>
    where
        T: Serialize + Clone + Debug,
    {
        self.save().await?;
        Ok(out)
    }
}
