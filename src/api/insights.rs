use crate::api::{Api, ApiResult, Request};
use crate::model::{CategoryStatistic, MonthOverview, TotalBalance, Transaction};
use serde::Deserialize;

#[derive(Deserialize)]
struct BalanceBody {
    balance: Vec<TotalBalance>,
}

#[derive(Deserialize)]
struct OverviewBody {
    overview: MonthOverview,
}

#[derive(Deserialize)]
struct StatisticsBody {
    statistics: Vec<CategoryStatistic>,
}

#[derive(Deserialize)]
struct TransactionsBody {
    transactions: Vec<Transaction>,
}

impl Api {
    /// `GET /api/insights/balance`: the user's total balance per month.
    pub async fn get_balance_history(&self) -> ApiResult<Vec<TotalBalance>> {
        let body: BalanceBody = self.call(Request::get("/api/insights/balance")).await?;
        Ok(body.balance)
    }

    /// `GET /api/insights/currentMonth/overview`
    pub async fn get_month_overview(&self) -> ApiResult<MonthOverview> {
        let body: OverviewBody = self
            .call(Request::get("/api/insights/currentMonth/overview"))
            .await?;
        Ok(body.overview)
    }

    /// `GET /api/insights/currentMonth/statistics`
    pub async fn get_month_statistics(&self) -> ApiResult<Vec<CategoryStatistic>> {
        let body: StatisticsBody = self
            .call(Request::get("/api/insights/currentMonth/statistics"))
            .await?;
        Ok(body.statistics)
    }

    /// `GET /api/insights/currentMonth/transactions`
    pub async fn get_month_transactions(&self) -> ApiResult<Vec<Transaction>> {
        let body: TransactionsBody = self
            .call(Request::get("/api/insights/currentMonth/transactions"))
            .await?;
        Ok(body.transactions)
    }
}
