//! The part of `RootState` that survives a restart.
//!
//! A snapshot is stored as one JSON document per slice. Statuses are never stored, and neither
//! is the session token, which lives in its own file.

use crate::model::{Account, AccountId, Category, Payee, Tag, TotalBalance, User};
use crate::store::{balance, RootState};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAccounts {
    pub accounts: Vec<Account>,
    pub selected: Option<AccountId>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub accounts: PersistedAccounts,
    pub balance: Vec<TotalBalance>,
    pub categories: Vec<Category>,
    pub payees: Vec<Payee>,
    pub tags: Vec<Tag>,
    pub user: Option<User>,
}

impl PersistedState {
    pub fn capture(state: &RootState) -> Self {
        Self {
            accounts: PersistedAccounts {
                accounts: state.accounts.accounts.clone(),
                selected: state.accounts.selected.clone(),
            },
            balance: state.balance.data.clone(),
            categories: state.categories.data.clone(),
            payees: state.payees.data.clone(),
            tags: state.tags.data.clone(),
            user: state.user.user.clone(),
        }
    }

    /// Splits the snapshot into `(slice, json)` rows.
    pub fn to_rows(&self) -> crate::Result<Vec<(String, String)>> {
        let value = serde_json::to_value(self).context("Unable to serialize the snapshot")?;
        let Value::Object(slices) = value else {
            anyhow::bail!("A snapshot must serialize to a JSON object");
        };
        slices
            .into_iter()
            .map(|(slice, json)| -> crate::Result<(String, String)> {
                let json = serde_json::to_string(&json)
                    .with_context(|| format!("Unable to serialize the {slice} slice"))?;
                Ok((slice, json))
            })
            .collect()
    }

    /// Reassembles a snapshot from `(slice, json)` rows. Slices without a row are empty.
    pub fn from_rows(rows: Vec<(String, String)>) -> crate::Result<Self> {
        let mut slices = Map::new();
        for (slice, json) in rows {
            let value: Value = serde_json::from_str(&json)
                .with_context(|| format!("The stored {slice} slice is not valid JSON"))?;
            slices.insert(slice, value);
        }
        serde_json::from_value(Value::Object(slices)).context("Unable to restore the snapshot")
    }

    /// Writes the snapshot into `state`. Every restored slice starts out idle.
    pub(crate) fn restore(self, state: &mut RootState, token: Option<String>) {
        *state = RootState::default();
        state.accounts.accounts = self.accounts.accounts;
        state.accounts.selected = self.accounts.selected;
        balance::set_rows(&mut state.balance, self.balance);
        state.categories.data = self.categories;
        state.payees.data = self.payees;
        state.tags.data = self.tags;
        state.user.user = self.user;
        state.user.token = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Action, LoadingState, RequestKind, Store};
    use crate::test::{account, tag, total, user};

    fn populated() -> Store {
        let store = Store::new();
        store.dispatch(Action::SetAccounts(vec![account("a", "10"), account("b", "20")]));
        store.dispatch(Action::SetSelectedAccount(Some(AccountId::new("b"))));
        store.dispatch(Action::SetList(crate::store::ListPayload::Tags(vec![tag(
            "t", "trip",
        )])));
        let request = store.begin(RequestKind::FetchTotalBalance);
        store.dispatch(Action::TotalBalanceFetched(
            request,
            vec![total(2024, 5, "30")],
        ));
        store
    }

    #[test]
    fn rows_round_trip() {
        let store = populated();
        let mut snapshot = store.select(PersistedState::capture);
        snapshot.user = Some(user("ann"));

        let rows = snapshot.to_rows().unwrap();
        let slices: Vec<&str> = rows.iter().map(|(slice, _)| slice.as_str()).collect();
        assert!(slices.contains(&"accounts"));
        assert!(slices.contains(&"tags"));

        let restored = PersistedState::from_rows(rows).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn missing_rows_restore_empty() {
        let restored = PersistedState::from_rows(vec![(
            "payees".to_string(),
            r#"[{"id": "p", "name": "Shop"}]"#.to_string(),
        )])
        .unwrap();
        assert_eq!(restored.payees.len(), 1);
        assert!(restored.accounts.accounts.is_empty());
        assert!(restored.user.is_none());
    }

    #[test]
    fn restore_leaves_every_status_idle() {
        let store = populated();
        assert_eq!(
            store.select(|s| s.balance.status.loading),
            LoadingState::Succeeded
        );
        let snapshot = store.select(PersistedState::capture);

        let fresh = Store::new();
        fresh.dispatch(Action::Restore {
            snapshot: Box::new(snapshot),
            token: Some("tok".to_string()),
        });
        let state = fresh.state();
        assert_eq!(state.accounts.accounts.len(), 2);
        assert_eq!(state.accounts.selected, Some(AccountId::new("b")));
        assert!(state.accounts.transactions.is_empty());
        assert_eq!(state.balance.status.loading, LoadingState::Idle);
        assert_eq!(state.balance.data.len(), 1);
        assert_eq!(state.user.token.as_deref(), Some("tok"));
    }

    #[test]
    fn token_is_never_captured() {
        let mut state = RootState::default();
        state.user.token = Some("secret".to_string());
        let rows = PersistedState::capture(&state).to_rows().unwrap();
        assert!(rows.iter().all(|(_, json)| !json.contains("secret")));
    }
}
