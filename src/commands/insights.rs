use crate::args::InsightsCommand;
use crate::commands::{Context, Out};
use crate::store::selectors;
use crate::Result;
use anyhow::Context as _;
use serde_json::Value;

/// Fetches one of the dashboard figures. The structured output is the raw figure as JSON.
pub async fn insights(ctx: &Context, command: InsightsCommand) -> Result<Out<Value>> {
    let store = ctx.store();
    let api = ctx.api();
    let (message, value) = match command {
        InsightsCommand::Balance => {
            store.fetch_balance_trend(api).await?;
            let rows = store.select(|s| s.insights.balance_trend.clone());
            let lines: Vec<String> = rows
                .iter()
                .map(|row| {
                    format!(
                        "{}-{:02}  {} {}",
                        row.year,
                        row.month,
                        row.balance.display_in(row.currency),
                        row.currency
                    )
                })
                .collect();
            (lines.join("\n"), serde_json::to_value(&rows))
        }
        InsightsCommand::Overview => {
            let overview = store.fetch_month_overview(api).await?;
            let message = format!(
                "Income: {} {currency}\nExpenses: {} {currency}",
                overview.income.display_in(overview.currency),
                overview.expenses.display_in(overview.currency),
                currency = overview.currency
            );
            (message, serde_json::to_value(&overview))
        }
        InsightsCommand::Statistics => {
            let statistics = store.fetch_month_statistics(api).await?;
            let lines: Vec<String> = statistics
                .iter()
                .map(|s| format!("{}  {}", s.category_name, s.amount))
                .collect();
            (lines.join("\n"), serde_json::to_value(&statistics))
        }
        InsightsCommand::Recent => {
            let recent = store.fetch_recent_transactions(api).await?;
            let message = store.select(|s| {
                recent
                    .iter()
                    .map(|t| {
                        let account = selectors::account_by_id(s, &t.from_account_id)
                            .map(|a| a.name.as_str())
                            .unwrap_or(t.from_account_id.as_str());
                        format!(
                            "{}  {}  {}  {}",
                            t.date.format("%Y-%m-%d"),
                            account,
                            t.kind,
                            t.amount
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            });
            (message, serde_json::to_value(&recent))
        }
    };
    let value = value.context("Unable to serialize insights")?;
    let message = if message.is_empty() {
        "Nothing to show yet".to_string()
    } else {
        message
    };
    ctx.finish(Out::new(message, value)).await
}
