//! Types that mirror the entities served by the finance API, such as `Account` and
//! `Transaction`, along with the request and response bodies used to change them.
mod account;
mod amount;
mod balance;
mod insights;
mod resources;
mod transaction;
mod user;

pub use account::{
    Account, AccountBalance, AccountCreated, AccountDeleted, AccountUpdate, Currency, NewAccount,
};
pub use amount::{Amount, AmountError};
pub use balance::TotalBalance;
pub use insights::{CategoryStatistic, MonthOverview};
pub use resources::{Category, CategoryType, NamedResource, Payee, Tag};
pub use transaction::{
    EntryKind, Transaction, TransactionDraft, TransactionOutcome, TransactionPage, TransactionTag,
    TransactionType, TransferDraft, TransferOutcome,
};
pub use user::{Credentials, PasswordChange, Role, SignUp, User};

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Something the API stores and identifies with an opaque id.
pub trait Entity {
    type Id: Debug + Clone + Eq;

    fn id(&self) -> &Self::Id;
}

/// Declares a newtype around an opaque, server-assigned string id.
macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_type!(
    /// Identifies an `Account`.
    AccountId
);
id_type!(
    /// Identifies a `Transaction`, including transfers.
    TransactionId
);
id_type!(CategoryId);
id_type!(PayeeId);
id_type!(TagId);
id_type!(UserId);
