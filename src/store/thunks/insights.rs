use crate::api::Api;
use crate::model::{CategoryStatistic, MonthOverview, TotalBalance, Transaction};
use crate::store::{Action, InsightKind, InsightsPayload, RequestKind, Store, ThunkResult};

impl Store {
    /// Fills the balance slice with the user's monthly totals.
    pub async fn fetch_total_balance(&self, api: &Api) -> ThunkResult<Vec<TotalBalance>> {
        self.run(
            RequestKind::FetchTotalBalance,
            api.get_balance_history(),
            Action::TotalBalanceFetched,
        )
        .await
    }

    pub async fn fetch_balance_trend(&self, api: &Api) -> ThunkResult<Vec<TotalBalance>> {
        self.run(
            RequestKind::FetchInsights(InsightKind::BalanceTrend),
            api.get_balance_history(),
            |request, rows| Action::InsightsFetched(request, InsightsPayload::BalanceTrend(rows)),
        )
        .await
    }

    pub async fn fetch_month_overview(&self, api: &Api) -> ThunkResult<MonthOverview> {
        self.run(
            RequestKind::FetchInsights(InsightKind::Overview),
            api.get_month_overview(),
            |request, overview| {
                Action::InsightsFetched(request, InsightsPayload::Overview(overview))
            },
        )
        .await
    }

    pub async fn fetch_month_statistics(&self, api: &Api) -> ThunkResult<Vec<CategoryStatistic>> {
        self.run(
            RequestKind::FetchInsights(InsightKind::Statistics),
            api.get_month_statistics(),
            |request, statistics| {
                Action::InsightsFetched(request, InsightsPayload::Statistics(statistics))
            },
        )
        .await
    }

    pub async fn fetch_recent_transactions(&self, api: &Api) -> ThunkResult<Vec<Transaction>> {
        self.run(
            RequestKind::FetchInsights(InsightKind::Recent),
            api.get_month_transactions(),
            |request, transactions| {
                Action::InsightsFetched(request, InsightsPayload::Recent(transactions))
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::TestHttp;
    use crate::store::{selectors, LoadingState, Store};
    use crate::test::{amount, api, transaction_json};
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn dashboard() {
        let http = TestHttp::new();
        let balance = json!({"balance": [
            {"month": 2, "year": 2024, "currency": "USD", "balance": "200"},
            {"month": 1, "year": 2024, "currency": "USD", "balance": "100"}
        ]});
        http.respond(Method::GET, "/api/insights/balance", balance.clone());
        http.respond(Method::GET, "/api/insights/balance", balance);
        http.respond(
            Method::GET,
            "/api/insights/currentMonth/overview",
            json!({"overview": {"income": "1000", "expenses": 250.5}}),
        );
        http.respond(
            Method::GET,
            "/api/insights/currentMonth/statistics",
            json!({"statistics": [
                {"categoryId": "c1", "categoryName": "Food", "amount": "200"},
                {"categoryId": null, "categoryName": "Other", "amount": "50.5"}
            ]}),
        );
        http.respond(
            Method::GET,
            "/api/insights/currentMonth/transactions",
            json!({"transactions": [transaction_json("t1", "a", "5", 1)]}),
        );
        let store = Store::new();
        let api = api(&http);

        store.fetch_total_balance(&api).await.unwrap();
        store.fetch_balance_trend(&api).await.unwrap();
        store.fetch_month_overview(&api).await.unwrap();
        store.fetch_month_statistics(&api).await.unwrap();
        store.fetch_recent_transactions(&api).await.unwrap();

        let state = store.state();
        assert_eq!(
            selectors::current_total_balance(&state).unwrap().balance,
            amount("200")
        );
        assert_eq!(state.balance.status.loading, LoadingState::Succeeded);
        assert_eq!(state.insights.balance_trend[0].month, 1);
        assert_eq!(
            state.insights.overview.as_ref().unwrap().expenses,
            amount("250.5")
        );
        assert_eq!(state.insights.statistics.len(), 2);
        assert!(state.insights.statistics[1].category_id.is_none());
        assert_eq!(state.insights.recent.len(), 1);
        assert_eq!(state.insights.status.loading, LoadingState::Succeeded);
    }

    #[tokio::test]
    async fn failed_insight_keeps_previous_data() {
        let http = TestHttp::new();
        http.respond(
            Method::GET,
            "/api/insights/currentMonth/overview",
            json!({"overview": {"income": "1", "expenses": "2"}}),
        );
        http.fail(
            Method::GET,
            "/api/insights/currentMonth/overview",
            502,
            json!("Bad Gateway"),
        );
        let store = Store::new();
        let api = api(&http);

        let overview = store.fetch_month_overview(&api).await.unwrap();
        store.fetch_month_overview(&api).await.unwrap_err();
        let state = store.state();
        assert_eq!(state.insights.overview, Some(overview));
        assert_eq!(state.insights.status.loading, LoadingState::Failed);
    }
}
