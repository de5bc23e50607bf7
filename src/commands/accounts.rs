use crate::args::{CreateAccountArgs, IdArgs, SelectArgs, UpdateAccountArgs};
use crate::commands::{Context, Out};
use crate::model::{Account, AccountId, AccountUpdate, NewAccount};
use crate::store::selectors;
use crate::Result;
use anyhow::bail;

/// One line per account, e.g. `acc-1  Checking  1,250.50 USD (credit)`.
pub(super) fn describe_account(account: &Account) -> String {
    format!(
        "{}  {}  {} {}{}",
        account.id,
        account.name,
        account.balance.display_in(account.currency),
        account.currency,
        if account.is_credit { " (credit)" } else { "" }
    )
}

pub async fn accounts_list(ctx: &Context) -> Result<Out<Vec<Account>>> {
    let accounts = ctx.store().fetch_accounts(ctx.api()).await?;
    let selected = ctx.store().select(|s| s.accounts.selected.clone());
    let lines: Vec<String> = accounts
        .iter()
        .map(|account| {
            let marker = if selected.as_ref() == Some(&account.id) {
                "* "
            } else {
                "  "
            };
            format!("{marker}{}", describe_account(account))
        })
        .collect();
    let message = if lines.is_empty() {
        "No accounts".to_string()
    } else {
        format!("{} account(s):\n{}", lines.len(), lines.join("\n"))
    };
    ctx.finish(Out::new(message, accounts)).await
}

pub async fn account_create(ctx: &Context, args: &CreateAccountArgs) -> Result<Out<Account>> {
    let new_account = NewAccount {
        name: args.name.clone(),
        currency: args.currency,
        balance: args.balance,
        is_credit: args.credit,
        icon: args.icon.clone(),
    };
    let created = ctx.store().create_account(ctx.api(), &new_account).await?;
    ctx.finish(Out::new(
        format!("Created {}", describe_account(&created.account)),
        created.account,
    ))
    .await
}

pub async fn account_update(ctx: &Context, args: &UpdateAccountArgs) -> Result<Out<Account>> {
    let update = AccountUpdate {
        name: args.name.clone(),
        icon: args.icon.clone(),
        is_credit: args.credit,
    };
    let account = ctx
        .store()
        .update_account(ctx.api(), &AccountId::new(&args.id), &update)
        .await?;
    ctx.finish(Out::new(
        format!("Updated {}", describe_account(&account)),
        account,
    ))
    .await
}

pub async fn account_delete(ctx: &Context, args: &IdArgs) -> Result<Out<Account>> {
    let deleted = ctx
        .store()
        .delete_account(ctx.api(), &AccountId::new(&args.id))
        .await?;
    ctx.finish(Out::new(
        format!("Deleted account {}", deleted.deleted_account.name),
        deleted.deleted_account,
    ))
    .await
}

/// Selects the account that `transactions` commands default to. The account list is refreshed
/// first if the account is not known locally.
pub async fn account_select(ctx: &Context, args: &SelectArgs) -> Result<Out<Option<Account>>> {
    let Some(id) = args.id.as_deref().map(AccountId::new) else {
        ctx.store().set_selected_account(None);
        return ctx.finish("Cleared the selected account".into()).await;
    };
    if ctx
        .store()
        .select(|s| selectors::account_by_id(s, &id).is_none())
    {
        ctx.store().fetch_accounts(ctx.api()).await?;
    }
    let Some(account) = ctx
        .store()
        .select(|s| selectors::account_by_id(s, &id).cloned())
    else {
        bail!("There is no account with id '{id}'");
    };
    ctx.store().set_selected_account(Some(id));
    ctx.finish(Out::new(
        format!("Selected {}", describe_account(&account)),
        Some(account),
    ))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Currency;
    use crate::test::{account, account_json, amount, TestEnv};
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn account_line() {
        let mut card = account("c", "-1250.5");
        card.is_credit = true;
        card.currency = Currency::Uah;
        assert!(describe_account(&card).ends_with("UAH (credit)"));
        assert!(describe_account(&account("a", "1250.5")).contains("1,250.50 USD"));
    }

    #[tokio::test]
    async fn list_marks_selection_and_persists() {
        let env = TestEnv::new().await;
        env.http().respond(
            Method::GET,
            "/api/accounts",
            json!({"accounts": [account_json("a", "10"), account_json("b", "20")]}),
        );
        let ctx = env.context().await;
        ctx.store().set_selected_account(Some(AccountId::new("b")));

        let out = accounts_list(&ctx).await.unwrap();
        assert_eq!(out.structure().unwrap().len(), 2);
        assert!(out.message().contains("* b"));

        let restored = env.context().await.store().state();
        assert_eq!(restored.accounts.accounts.len(), 2);
        assert_eq!(restored.accounts.selected, Some(AccountId::new("b")));
    }

    #[tokio::test]
    async fn select_unknown_account_fails() {
        let env = TestEnv::new().await;
        env.http().respond(
            Method::GET,
            "/api/accounts",
            json!({"accounts": [account_json("a", "10")]}),
        );
        let ctx = env.context().await;
        let args = SelectArgs {
            id: Some("zzz".to_string()),
        };
        assert!(account_select(&ctx, &args).await.is_err());
        assert!(ctx.store().state().accounts.selected.is_none());
    }

    #[tokio::test]
    async fn create_appends_account() {
        let env = TestEnv::new().await;
        env.http().respond(
            Method::POST,
            "/api/accounts",
            json!({
                "account": account_json("n", "5"),
                "totalBalance": {"month": 1, "year": 2025, "balance": "5"}
            }),
        );
        let ctx = env.context().await;
        let args = CreateAccountArgs {
            name: "New".to_string(),
            currency: Currency::Usd,
            balance: amount("5"),
            credit: false,
            icon: String::new(),
        };
        account_create(&ctx, &args).await.unwrap();
        let state = env.context().await.store().state();
        assert_eq!(state.accounts.accounts.len(), 1);
        assert_eq!(state.balance.data.len(), 1);
    }
}
