use crate::api::{Api, ApiResult, Request};
use crate::model::{
    AccountId, Transaction, TransactionDraft, TransactionId, TransactionOutcome, TransactionPage,
    TransferDraft, TransferOutcome,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
struct TransactionBody {
    transaction: Transaction,
}

impl Api {
    /// `GET /api/transactions/:accountId?offset=&limit=`
    pub async fn get_transactions(
        &self,
        account_id: &AccountId,
        offset: Option<u64>,
        limit: Option<u64>,
    ) -> ApiResult<TransactionPage> {
        let request = Request::get(format!("/api/transactions/{account_id}"))
            .with_query("offset", offset)
            .with_query("limit", limit);
        self.call(request).await
    }

    /// `POST /api/transactions`
    pub async fn create_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> ApiResult<TransactionOutcome> {
        self.call(Request::post("/api/transactions", json!(draft)))
            .await
    }

    /// `PATCH /api/transactions/:id`
    pub async fn update_transaction(
        &self,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> ApiResult<TransactionOutcome> {
        self.call(Request::patch(
            format!("/api/transactions/{id}"),
            json!(draft),
        ))
        .await
    }

    /// `DELETE /api/transactions/:id`
    pub async fn delete_transaction(&self, id: &TransactionId) -> ApiResult<TransactionOutcome> {
        self.call(Request::delete(format!("/api/transactions/{id}")))
            .await
    }

    /// `POST /api/transfers`
    pub async fn create_transfer(&self, draft: &TransferDraft) -> ApiResult<Transaction> {
        let body: TransactionBody = self
            .call(Request::post("/api/transfers", json!(draft)))
            .await?;
        Ok(body.transaction)
    }

    /// `PATCH /api/transfers/:id`
    pub async fn update_transfer(
        &self,
        id: &TransactionId,
        draft: &TransferDraft,
    ) -> ApiResult<TransferOutcome> {
        self.call(Request::patch(format!("/api/transfers/{id}"), json!(draft)))
            .await
    }

    /// `DELETE /api/transfers/:id`
    pub async fn delete_transfer(&self, id: &TransactionId) -> ApiResult<TransferOutcome> {
        self.call(Request::delete(format!("/api/transfers/{id}")))
            .await
    }
}
