use crate::api::Api;
use crate::model::{TransactionDraft, TransactionId, TransactionOutcome, TransactionPage};
use crate::store::{Action, RequestKind, Store, ThunkResult, TransactionQuery};

impl Store {
    /// Fetches a page of an account's transactions into the feed. The response is dropped if a
    /// newer fetch was issued meanwhile or if the account is no longer selected.
    pub async fn fetch_transactions(
        &self,
        api: &Api,
        query: &TransactionQuery,
    ) -> ThunkResult<TransactionPage> {
        let reset = query.is_reset();
        let account_id = query.account_id.clone();
        self.run(
            RequestKind::FetchTransactions,
            api.get_transactions(&query.account_id, query.offset, query.limit),
            move |request, page| Action::TransactionsFetched {
                request,
                account_id,
                reset,
                page,
            },
        )
        .await
    }

    pub async fn create_transaction(
        &self,
        api: &Api,
        draft: &TransactionDraft,
    ) -> ThunkResult<TransactionOutcome> {
        self.run(
            RequestKind::CreateTransaction,
            api.create_transaction(draft),
            Action::TransactionCreated,
        )
        .await
    }

    pub async fn update_transaction(
        &self,
        api: &Api,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> ThunkResult<TransactionOutcome> {
        self.run(
            RequestKind::UpdateTransaction,
            api.update_transaction(id, draft),
            Action::TransactionUpdated,
        )
        .await
    }

    pub async fn delete_transaction(
        &self,
        api: &Api,
        id: &TransactionId,
    ) -> ThunkResult<TransactionOutcome> {
        self.run(
            RequestKind::DeleteTransaction,
            api.delete_transaction(id),
            Action::TransactionDeleted,
        )
        .await
    }
}
