use crate::api::{Api, ApiResult, Request};
use crate::model::{Account, AccountCreated, AccountDeleted, AccountId, AccountUpdate, NewAccount};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
struct AccountsBody {
    accounts: Vec<Account>,
}

#[derive(Deserialize)]
struct AccountBody {
    account: Account,
}

impl Api {
    /// `GET /api/accounts`
    pub async fn get_accounts(&self) -> ApiResult<Vec<Account>> {
        let body: AccountsBody = self.call(Request::get("/api/accounts")).await?;
        Ok(body.accounts)
    }

    /// `POST /api/accounts`
    pub async fn create_account(&self, account: &NewAccount) -> ApiResult<AccountCreated> {
        self.call(Request::post("/api/accounts", json!(account)))
            .await
    }

    /// `PATCH /api/accounts/:id`
    pub async fn update_account(
        &self,
        id: &AccountId,
        update: &AccountUpdate,
    ) -> ApiResult<Account> {
        let body: AccountBody = self
            .call(Request::patch(format!("/api/accounts/{id}"), json!(update)))
            .await?;
        Ok(body.account)
    }

    /// `DELETE /api/accounts/:id`
    pub async fn delete_account(&self, id: &AccountId) -> ApiResult<AccountDeleted> {
        self.call(Request::delete(format!("/api/accounts/{id}")))
            .await
    }
}
