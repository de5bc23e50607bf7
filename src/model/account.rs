use crate::model::{AccountId, Amount, Entity, TotalBalance};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The currencies an account can be held in.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Uah,
    #[default]
    Usd,
    Eur,
    Btc,
    Eth,
}

serde_plain::derive_display_from_serialize!(Currency);
serde_plain::derive_fromstr_from_deserialize!(Currency);

impl Currency {
    /// The number of decimal places customarily shown for this currency.
    pub fn decimals(self) -> u32 {
        match self {
            Currency::Uah | Currency::Usd | Currency::Eur => 2,
            Currency::Btc | Currency::Eth => 8,
        }
    }
}

/// A bank, cash or crypto account owned by the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Current balance as computed by the server. Negative only for credit accounts.
    pub balance: Amount,
    pub currency: Currency,
    #[serde(default)]
    pub is_credit: bool,
    /// Free-form icon tag chosen by the user.
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &AccountId {
        &self.id
    }
}

impl Account {
    /// Whether withdrawing `amount` is allowed. Only credit accounts may go below zero.
    pub fn can_withdraw(&self, amount: Amount) -> bool {
        self.is_credit || !(self.balance - amount).is_negative()
    }
}

/// Request body for creating an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub currency: Currency,
    /// Opening balance.
    pub balance: Amount,
    pub is_credit: bool,
    pub icon: String,
}

/// Request body for editing an account. The currency and balance cannot be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_credit: Option<bool>,
}

/// The server-computed balance of one account after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub id: AccountId,
    pub balance: Amount,
}

/// Response to creating an account: the account and the user's updated total balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreated {
    pub account: Account,
    pub total_balance: TotalBalance,
}

/// Response to deleting an account: the deleted account and the user's updated total balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDeleted {
    pub deleted_account: Account,
    pub user_balance: TotalBalance,
}
