//! The insights slice, which backs the dashboard.

use crate::model::{CategoryStatistic, MonthOverview, TotalBalance, Transaction};
use crate::store::{InsightKind, Status};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InsightsState {
    pub balance_trend: Vec<TotalBalance>,
    pub overview: Option<MonthOverview>,
    pub statistics: Vec<CategoryStatistic>,
    /// The current month's transactions across all accounts.
    pub recent: Vec<Transaction>,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightsPayload {
    BalanceTrend(Vec<TotalBalance>),
    Overview(MonthOverview),
    Statistics(Vec<CategoryStatistic>),
    Recent(Vec<Transaction>),
}

impl InsightsPayload {
    pub fn kind(&self) -> InsightKind {
        match self {
            InsightsPayload::BalanceTrend(_) => InsightKind::BalanceTrend,
            InsightsPayload::Overview(_) => InsightKind::Overview,
            InsightsPayload::Statistics(_) => InsightKind::Statistics,
            InsightsPayload::Recent(_) => InsightKind::Recent,
        }
    }
}

impl InsightsState {
    pub(crate) fn apply(&mut self, payload: InsightsPayload) {
        match payload {
            InsightsPayload::BalanceTrend(mut rows) => {
                rows.sort_by_key(TotalBalance::period);
                self.balance_trend = rows;
            }
            InsightsPayload::Overview(overview) => self.overview = Some(overview),
            InsightsPayload::Statistics(statistics) => self.statistics = statistics,
            InsightsPayload::Recent(transactions) => self.recent = transactions,
        }
    }
}
