use crate::model::{Amount, CategoryId, Currency};
use serde::{Deserialize, Serialize};

/// Income and spending for the current month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverview {
    pub income: Amount,
    pub expenses: Amount,
    #[serde(default)]
    pub currency: Currency,
}

/// Spending in one category for the current month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatistic {
    /// `None` for uncategorized spending.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub category_name: String,
    pub amount: Amount,
}
