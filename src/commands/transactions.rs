use crate::args::{
    Direction, IdArgs, ListTransactionsArgs, TransactionFields, TransferFields,
    UpdateTransactionArgs, UpdateTransferArgs,
};
use crate::commands::{Context, Out};
use crate::model::{
    AccountId, Amount, CategoryId, EntryKind, PayeeId, TagId, Transaction, TransactionDraft,
    TransactionId, TransactionOutcome, TransferDraft, TransferOutcome,
};
use crate::store::{selectors, RootState, TransactionQuery};
use crate::Result;
use anyhow::bail;
use chrono::{DateTime, Utc};

/// Formats one feed line, e.g. `2024-05-03  WITHDRAWAL  12.00  Groceries  [food, weekly]`.
fn describe_transaction(state: &RootState, transaction: &Transaction) -> String {
    let currency = selectors::account_by_id(state, &transaction.from_account_id)
        .map(|a| a.currency)
        .unwrap_or_default();
    let mut line = format!(
        "{}  {}  {}  {}",
        transaction.id,
        transaction.date.format("%Y-%m-%d"),
        transaction.kind,
        transaction.amount.display_in(currency)
    );
    if let Some(name) = transaction
        .category_id
        .as_ref()
        .and_then(|id| selectors::category_name(state, id))
    {
        line.push_str("  ");
        line.push_str(name);
    }
    if let Some(name) = transaction
        .payee_id
        .as_ref()
        .and_then(|id| selectors::payee_name(state, id))
    {
        line.push_str(" @ ");
        line.push_str(name);
    }
    let tags = selectors::tag_names(state, transaction);
    if !tags.is_empty() {
        line.push_str(&format!("  [{}]", tags.join(", ")));
    }
    if !transaction.description.is_empty() {
        line.push_str("  ");
        line.push_str(&transaction.description);
    }
    line
}

/// The account named on the command line, falling back to the selected one.
fn resolve_account(ctx: &Context, account: Option<&str>) -> Result<AccountId> {
    match account {
        Some(id) => Ok(AccountId::new(id)),
        None => match ctx.store().select(|s| s.accounts.selected.clone()) {
            Some(id) => Ok(id),
            None => bail!(
                "No account given and none is selected, use --account or `accounts select`"
            ),
        },
    }
}

/// Fetches a page of an account's transactions. The account becomes the selected one.
pub async fn transactions_list(
    ctx: &Context,
    args: &ListTransactionsArgs,
) -> Result<Out<Vec<Transaction>>> {
    let account_id = resolve_account(ctx, args.account.as_deref())?;
    if ctx.store().select(|s| !s.accounts.is_selected(&account_id)) {
        ctx.store().set_selected_account(Some(account_id.clone()));
    }
    let query = TransactionQuery {
        account_id,
        offset: args.offset,
        limit: args.limit,
    };
    ctx.store().fetch_transactions(ctx.api(), &query).await?;

    let (feed, lines, more) = ctx.store().select(|s| {
        let feed = selectors::transactions_feed(s).to_vec();
        let lines: Vec<String> = feed.iter().map(|t| describe_transaction(s, t)).collect();
        (feed, lines, selectors::has_more_transactions(s))
    });
    let mut message = if lines.is_empty() {
        "No transactions".to_string()
    } else {
        lines.join("\n")
    };
    if more {
        message.push_str("\n(more available, use --offset)");
    }
    ctx.finish(Out::new(message, feed)).await
}

/// Makes sure the account is known locally so that withdrawals can be checked against it.
async fn ensure_account(ctx: &Context, id: &AccountId) -> Result<()> {
    if ctx
        .store()
        .select(|s| selectors::account_by_id(s, id).is_none())
    {
        ctx.store().fetch_accounts(ctx.api()).await?;
    }
    if ctx
        .store()
        .select(|s| selectors::account_by_id(s, id).is_none())
    {
        bail!("There is no account with id '{id}'");
    }
    Ok(())
}

/// What a draft replaces. An edit whose original is not in the loaded feed is `Unknown`: its
/// date cannot be kept and the funds it held cannot be counted, so the server decides.
#[derive(Debug, Clone)]
enum Replacing {
    Nothing,
    Known(Transaction),
    Unknown(TransactionId),
}

impl Replacing {
    /// What an edit of `id` replaces.
    fn lookup(ctx: &Context, id: &TransactionId) -> Self {
        match ctx
            .store()
            .select(|s| selectors::transaction_by_id(s, id).cloned())
        {
            Some(original) => Replacing::Known(original),
            None => Replacing::Unknown(id.clone()),
        }
    }

    /// The given date, or the original's when editing.
    fn date(&self, given: Option<DateTime<Utc>>) -> Result<DateTime<Utc>> {
        match (given, self) {
            (Some(date), _) => Ok(date),
            (None, Replacing::Nothing) => Ok(Utc::now()),
            (None, Replacing::Known(original)) => Ok(original.date),
            (None, Replacing::Unknown(id)) => bail!(
                "Transaction '{id}' is not in the loaded feed, \
                pass --date or list its account first"
            ),
        }
    }

    /// Whether withdrawing `amount` from `account` is allowed once the original is undone.
    fn allows(&self, ctx: &Context, account: &AccountId, amount: Amount) -> bool {
        let released = match self {
            Replacing::Nothing => Amount::ZERO,
            Replacing::Known(original) => original.withdrawn_from(account),
            Replacing::Unknown(_) => return true,
        };
        ctx.store()
            .select(|s| selectors::can_withdraw(s, account, amount - released))
    }
}

async fn transaction_draft(
    ctx: &Context,
    fields: &TransactionFields,
    replacing: &Replacing,
) -> Result<TransactionDraft> {
    if !fields.amount.is_positive() {
        bail!("The amount must be greater than zero");
    }
    let account_id = resolve_account(ctx, fields.account.as_deref())?;
    ensure_account(ctx, &account_id).await?;
    let date = replacing.date(fields.date)?;
    if fields.kind == Direction::Withdrawal && !replacing.allows(ctx, &account_id, fields.amount) {
        bail!("Insufficient funds on account '{account_id}'");
    }
    Ok(TransactionDraft {
        amount: fields.amount,
        kind: EntryKind::from(fields.kind),
        from_account_id: account_id,
        category_id: fields.category.as_deref().map(CategoryId::new),
        payee_id: fields.payee.as_deref().map(PayeeId::new),
        tags: fields.tags.iter().map(TagId::new).collect(),
        date,
        description: fields.description.clone(),
    })
}

fn outcome_message(ctx: &Context, verb: &str, outcome: &TransactionOutcome) -> String {
    ctx.store().select(|s| {
        let account = &outcome.transaction.from_account_id;
        let currency = selectors::account_by_id(s, account)
            .map(|a| a.currency)
            .unwrap_or_default();
        format!(
            "{verb} {}\nBalance of {account}: {} {currency}",
            describe_transaction(s, &outcome.transaction),
            outcome.balance.display_in(currency)
        )
    })
}

pub async fn transaction_create(
    ctx: &Context,
    fields: &TransactionFields,
) -> Result<Out<TransactionOutcome>> {
    let draft = transaction_draft(ctx, fields, &Replacing::Nothing).await?;
    let outcome = ctx.store().create_transaction(ctx.api(), &draft).await?;
    let message = outcome_message(ctx, "Created", &outcome);
    ctx.finish(Out::new(message, outcome)).await
}

pub async fn transaction_update(
    ctx: &Context,
    args: &UpdateTransactionArgs,
) -> Result<Out<TransactionOutcome>> {
    let id = TransactionId::new(&args.id);
    let replacing = Replacing::lookup(ctx, &id);
    let draft = transaction_draft(ctx, &args.fields, &replacing).await?;
    let outcome = ctx.store().update_transaction(ctx.api(), &id, &draft).await?;
    let message = outcome_message(ctx, "Updated", &outcome);
    ctx.finish(Out::new(message, outcome)).await
}

pub async fn transaction_delete(ctx: &Context, args: &IdArgs) -> Result<Out<TransactionOutcome>> {
    let outcome = ctx
        .store()
        .delete_transaction(ctx.api(), &TransactionId::new(&args.id))
        .await?;
    let message = outcome_message(ctx, "Deleted", &outcome);
    ctx.finish(Out::new(message, outcome)).await
}

async fn transfer_draft(
    ctx: &Context,
    fields: &TransferFields,
    replacing: &Replacing,
) -> Result<TransferDraft> {
    if !fields.amount.is_positive() {
        bail!("The amount must be greater than zero");
    }
    let from = AccountId::new(&fields.from);
    let to = AccountId::new(&fields.to);
    if from == to {
        bail!("A transfer needs two different accounts");
    }
    ensure_account(ctx, &from).await?;
    ensure_account(ctx, &to).await?;
    let date = replacing.date(fields.date)?;
    let same_currency = ctx.store().select(|s| {
        let currency = |id: &AccountId| selectors::account_by_id(s, id).map(|a| a.currency);
        currency(&from) == currency(&to)
    });
    if !replacing.allows(ctx, &from, fields.amount) {
        bail!("Insufficient funds on account '{from}'");
    }
    if !same_currency && fields.converted.is_none() {
        bail!("The accounts use different currencies, pass --converted");
    }
    Ok(TransferDraft {
        amount: fields.amount,
        converted_amount: if same_currency {
            None
        } else {
            fields.converted
        },
        from_account_id: from,
        to_account_id: to,
        tags: fields.tags.iter().map(TagId::new).collect(),
        date,
        description: fields.description.clone(),
    })
}

fn transfer_message(ctx: &Context, verb: &str, outcome: &TransferOutcome) -> String {
    ctx.store().select(|s| {
        let balance = |id: &AccountId, amount: Amount| {
            let currency = selectors::account_by_id(s, id)
                .map(|a| a.currency)
                .unwrap_or_default();
            format!("{id}: {} {currency}", amount.display_in(currency))
        };
        format!(
            "{verb} {}\n{}\n{}",
            describe_transaction(s, &outcome.transaction),
            balance(&outcome.from_account.id, outcome.from_account.balance),
            balance(&outcome.to_account.id, outcome.to_account.balance)
        )
    })
}

pub async fn transfer_create(ctx: &Context, fields: &TransferFields) -> Result<Out<Transaction>> {
    let draft = transfer_draft(ctx, fields, &Replacing::Nothing).await?;
    let transfer = ctx.store().create_transfer(ctx.api(), &draft).await?;
    let message = ctx
        .store()
        .select(|s| format!("Created {}", describe_transaction(s, &transfer)));
    ctx.finish(Out::new(message, transfer)).await
}

pub async fn transfer_update(
    ctx: &Context,
    args: &UpdateTransferArgs,
) -> Result<Out<TransferOutcome>> {
    let id = TransactionId::new(&args.id);
    let replacing = Replacing::lookup(ctx, &id);
    let draft = transfer_draft(ctx, &args.fields, &replacing).await?;
    let outcome = ctx.store().update_transfer(ctx.api(), &id, &draft).await?;
    let message = transfer_message(ctx, "Updated", &outcome);
    ctx.finish(Out::new(message, outcome)).await
}

pub async fn transfer_delete(ctx: &Context, args: &IdArgs) -> Result<Out<TransferOutcome>> {
    let outcome = ctx
        .store()
        .delete_transfer(ctx.api(), &TransactionId::new(&args.id))
        .await?;
    let message = transfer_message(ctx, "Deleted", &outcome);
    ctx.finish(Out::new(message, outcome)).await
}
