use crate::model::{Amount, Currency};
use serde::{Deserialize, Serialize};

/// The user's total balance across all accounts for one month, converted to USD by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalBalance {
    /// 1 through 12.
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub currency: Currency,
    pub balance: Amount,
}

impl TotalBalance {
    /// `(year, month)`, which orders balances chronologically.
    pub fn period(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}
