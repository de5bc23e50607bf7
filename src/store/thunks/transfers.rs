use crate::api::Api;
use crate::model::{Transaction, TransactionId, TransferDraft, TransferOutcome};
use crate::store::{Action, RequestKind, Store, ThunkResult};

impl Store {
    pub async fn create_transfer(
        &self,
        api: &Api,
        draft: &TransferDraft,
    ) -> ThunkResult<Transaction> {
        self.run(
            RequestKind::CreateTransfer,
            api.create_transfer(draft),
            Action::TransferCreated,
        )
        .await
    }

    pub async fn update_transfer(
        &self,
        api: &Api,
        id: &TransactionId,
        draft: &TransferDraft,
    ) -> ThunkResult<TransferOutcome> {
        self.run(
            RequestKind::UpdateTransfer,
            api.update_transfer(id, draft),
            Action::TransferUpdated,
        )
        .await
    }

    pub async fn delete_transfer(
        &self,
        api: &Api,
        id: &TransactionId,
    ) -> ThunkResult<TransferOutcome> {
        self.run(
            RequestKind::DeleteTransfer,
            api.delete_transfer(id),
            Action::TransferDeleted,
        )
        .await
    }
}
