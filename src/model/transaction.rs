use crate::model::{
    AccountBalance, AccountId, Amount, CategoryId, Entity, PayeeId, Tag, TagId, TransactionId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of a recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Withdrawal,
    Deposit,
    Transfer,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// The kinds that can be created or edited one account at a time. Transfers have their own
/// request bodies and endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    Withdrawal,
    Deposit,
}

serde_plain::derive_display_from_serialize!(EntryKind);
serde_plain::derive_fromstr_from_deserialize!(EntryKind);

impl From<EntryKind> for TransactionType {
    fn from(value: EntryKind) -> Self {
        match value {
            EntryKind::Withdrawal => TransactionType::Withdrawal,
            EntryKind::Deposit => TransactionType::Deposit,
        }
    }
}

/// Associates a tag with a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTag {
    pub tag_id: TagId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<DateTime<Utc>>,
}

/// A withdrawal, deposit or transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    /// Always non-negative; `kind` carries the direction.
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub from_account_id: AccountId,
    /// The receiving account of a transfer.
    #[serde(default)]
    pub to_account_id: Option<AccountId>,
    /// The amount credited to the receiving account when a transfer crosses currencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_amount: Option<Amount>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub payee_id: Option<PayeeId>,
    #[serde(default)]
    pub tags: Vec<TransactionTag>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &TransactionId {
        &self.id
    }
}

impl Transaction {
    /// Whether this transaction moves money in or out of `account`.
    pub fn touches(&self, account: &AccountId) -> bool {
        &self.from_account_id == account || self.to_account_id.as_ref() == Some(account)
    }

    /// The amount credited to the receiving side of a transfer.
    pub fn credited_amount(&self) -> Amount {
        self.converted_amount.unwrap_or(self.amount)
    }

    /// How much this transaction took out of `account`. Negative when it paid into it.
    pub fn withdrawn_from(&self, account: &AccountId) -> Amount {
        if &self.from_account_id == account {
            match self.kind {
                TransactionType::Deposit => -self.amount,
                TransactionType::Withdrawal | TransactionType::Transfer => self.amount,
            }
        } else if self.to_account_id.as_ref() == Some(account) {
            -self.credited_amount()
        } else {
            Amount::ZERO
        }
    }
}

/// Request body for creating or editing a single withdrawal or deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub from_account_id: AccountId,
    pub category_id: Option<CategoryId>,
    pub payee_id: Option<PayeeId>,
    pub tags: Vec<TagId>,
    pub date: DateTime<Utc>,
    pub description: String,
}

/// Request body for creating or editing a transfer between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDraft {
    pub amount: Amount,
    /// Required by the server when the two accounts hold different currencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_amount: Option<Amount>,
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub tags: Vec<TagId>,
    pub date: DateTime<Utc>,
    pub description: String,
}

/// One page of an account's transactions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    /// The total number of transactions the account has.
    #[serde(default)]
    pub count: Option<u64>,
}

/// Response to creating, editing or deleting a single transaction: the transaction and the
/// server-computed balance of its account afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutcome {
    pub transaction: Transaction,
    pub balance: Amount,
}

/// Response to editing or deleting a transfer: the transfer and the server-computed balances
/// of both accounts afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOutcome {
    pub transaction: Transaction,
    pub from_account: AccountBalance,
    pub to_account: AccountBalance,
}
