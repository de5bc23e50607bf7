use crate::api::Api;
use crate::model::{Account, AccountCreated, AccountDeleted, AccountId, AccountUpdate, NewAccount};
use crate::store::{Action, RequestKind, Store, ThunkResult};

impl Store {
    pub async fn fetch_accounts(&self, api: &Api) -> ThunkResult<Vec<Account>> {
        self.run(
            RequestKind::FetchAccounts,
            api.get_accounts(),
            Action::AccountsFetched,
        )
        .await
    }

    pub async fn create_account(
        &self,
        api: &Api,
        account: &NewAccount,
    ) -> ThunkResult<AccountCreated> {
        self.run(
            RequestKind::CreateAccount,
            api.create_account(account),
            Action::AccountCreated,
        )
        .await
    }

    pub async fn update_account(
        &self,
        api: &Api,
        id: &AccountId,
        update: &AccountUpdate,
    ) -> ThunkResult<Account> {
        self.run(
            RequestKind::UpdateAccount,
            api.update_account(id, update),
            Action::AccountUpdated,
        )
        .await
    }

    pub async fn delete_account(&self, api: &Api, id: &AccountId) -> ThunkResult<AccountDeleted> {
        self.run(
            RequestKind::DeleteAccount,
            api.delete_account(id),
            Action::AccountDeleted,
        )
        .await
    }

    /// Selects an account and clears the feed. Use `fetch_transactions` to fill it.
    pub fn set_selected_account(&self, id: Option<AccountId>) {
        self.dispatch(Action::SetSelectedAccount(id));
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{TestHttp, DEFAULT_ERROR_MESSAGE};
    use crate::model::{AccountId, AccountUpdate, Currency, NewAccount};
    use crate::store::{LoadingState, Store};
    use crate::test::{account_json, amount, api};
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn fetch_succeeds_with_exact_payload() {
        let http = TestHttp::new();
        http.respond(
            Method::GET,
            "/api/accounts",
            json!({"accounts": [account_json("a", "10"), account_json("b", "20")]}),
        );
        let store = Store::new();

        let accounts = store.fetch_accounts(&api(&http)).await.unwrap();
        let state = store.state();
        assert_eq!(state.accounts.accounts, accounts);
        assert_eq!(accounts.len(), 2);
        assert_eq!(state.accounts.status.loading, LoadingState::Succeeded);
        assert!(state.accounts.status.error.is_none());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_data() {
        let http = TestHttp::new();
        http.respond(
            Method::GET,
            "/api/accounts",
            json!({"accounts": [account_json("a", "10")]}),
        );
        http.fail(
            Method::GET,
            "/api/accounts",
            500,
            json!({"message": "Database is down"}),
        );
        let store = Store::new();
        let api = api(&http);

        store.fetch_accounts(&api).await.unwrap();
        let before = store.state().accounts.accounts;
        let error = store.fetch_accounts(&api).await.unwrap_err();

        let state = store.state();
        assert_eq!(error.message, "Database is down");
        assert_eq!(state.accounts.accounts, before);
        assert_eq!(state.accounts.status.loading, LoadingState::Failed);
        assert_eq!(state.accounts.status.error, Some(error));
    }

    #[tokio::test]
    async fn unreachable_server_gets_default_message() {
        let http = TestHttp::new();
        let store = Store::new();
        let error = store.fetch_accounts(&api(&http)).await.unwrap_err();
        assert_eq!(error.message, DEFAULT_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn last_issued_fetch_wins() {
        let http = TestHttp::new();
        let gate = Arc::new(Notify::new());
        http.respond_gated(
            Method::GET,
            "/api/accounts",
            json!({"accounts": [account_json("old", "1")]}),
            gate.clone(),
        );
        http.respond(
            Method::GET,
            "/api/accounts",
            json!({"accounts": [account_json("new", "2")]}),
        );
        let store = Store::new();
        let api = api(&http);

        let first = tokio::spawn({
            let store = store.clone();
            let api = api.clone();
            async move { store.fetch_accounts(&api).await }
        });
        // Let the first request reach the transport before issuing the second.
        while http.requests().is_empty() {
            tokio::task::yield_now().await;
        }
        store.fetch_accounts(&api).await.unwrap();
        gate.notify_one();
        first.await.unwrap().unwrap();

        let state = store.state();
        assert_eq!(state.accounts.accounts.len(), 1);
        assert_eq!(state.accounts.accounts[0].id, AccountId::new("new"));
        assert_eq!(state.accounts.status.loading, LoadingState::Succeeded);
    }

    #[tokio::test]
    async fn create_update_delete() {
        let http = TestHttp::new();
        http.respond(
            Method::POST,
            "/api/accounts",
            json!({
                "account": account_json("a", "10"),
                "totalBalance": {"month": 5, "year": 2024, "currency": "USD", "balance": "10"}
            }),
        );
        let mut renamed = account_json("a", "10");
        renamed["name"] = json!("Renamed");
        http.respond(Method::PATCH, "/api/accounts/a", json!({"account": renamed}));
        http.respond(
            Method::DELETE,
            "/api/accounts/a",
            json!({
                "deletedAccount": account_json("a", "10"),
                "userBalance": {"month": 5, "year": 2024, "balance": 0}
            }),
        );
        let store = Store::new();
        let api = api(&http);

        let new_account = NewAccount {
            name: "Account a".to_string(),
            currency: Currency::Usd,
            balance: amount("10"),
            is_credit: false,
            icon: "bank".to_string(),
        };
        store.create_account(&api, &new_account).await.unwrap();
        assert_eq!(store.select(|s| s.balance.data.len()), 1);

        let update = AccountUpdate {
            name: "Renamed".to_string(),
            icon: "bank".to_string(),
            is_credit: None,
        };
        store
            .update_account(&api, &AccountId::new("a"), &update)
            .await
            .unwrap();
        assert_eq!(store.select(|s| s.accounts.accounts[0].name.clone()), "Renamed");

        store.set_selected_account(Some(AccountId::new("a")));
        store
            .delete_account(&api, &AccountId::new("a"))
            .await
            .unwrap();
        let state = store.state();
        assert!(state.accounts.accounts.is_empty());
        assert!(state.accounts.selected.is_none());
        assert!(state.balance.data[0].balance.is_zero());
    }

    #[tokio::test]
    async fn rejected_mutation_leaves_data() {
        let http = TestHttp::new();
        http.respond(
            Method::GET,
            "/api/accounts",
            json!({"accounts": [account_json("a", "10")]}),
        );
        http.fail(
            Method::DELETE,
            "/api/accounts/a",
            404,
            json!({"message": "Account not found"}),
        );
        let store = Store::new();
        let api = api(&http);
        store.fetch_accounts(&api).await.unwrap();

        let error = store
            .delete_account(&api, &AccountId::new("a"))
            .await
            .unwrap_err();
        let state = store.state();
        assert_eq!(error.message, "Account not found");
        assert_eq!(state.accounts.accounts.len(), 1);
        assert_eq!(state.accounts.status.loading, LoadingState::Failed);
    }
}
