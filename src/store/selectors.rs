//! Read-only views derived from `RootState`. Use them with `Store::select`.

use crate::model::{
    Account, AccountId, Amount, CategoryId, Currency, PayeeId, TotalBalance, Transaction,
    TransactionId,
};
use crate::store::{balance, RootState};

pub fn selected_account(state: &RootState) -> Option<&Account> {
    let selected = state.accounts.selected.as_ref()?;
    account_by_id(state, selected)
}

pub fn account_by_id<'a>(state: &'a RootState, id: &AccountId) -> Option<&'a Account> {
    state.accounts.accounts.iter().find(|a| &a.id == id)
}

pub fn transactions_feed(state: &RootState) -> &[Transaction] {
    &state.accounts.transactions
}

/// A transaction of the loaded feed.
pub fn transaction_by_id<'a>(
    state: &'a RootState,
    id: &TransactionId,
) -> Option<&'a Transaction> {
    state.accounts.transactions.iter().find(|t| &t.id == id)
}

/// Whether the server holds more transactions for the selected account than the feed shows.
pub fn has_more_transactions(state: &RootState) -> bool {
    (state.accounts.transactions.len() as u64) < state.accounts.count
}

/// The user's total balance for the most recent month.
pub fn current_total_balance(state: &RootState) -> Option<&TotalBalance> {
    balance::latest(&state.balance)
}

/// Whether `amount` may be withdrawn from the account. Unknown accounts allow nothing.
pub fn can_withdraw(state: &RootState, account_id: &AccountId, amount: Amount) -> bool {
    account_by_id(state, account_id).is_some_and(|a| a.can_withdraw(amount))
}

pub fn category_name<'a>(state: &'a RootState, id: &CategoryId) -> Option<&'a str> {
    state
        .categories
        .data
        .iter()
        .find(|c| &c.id == id)
        .map(|c| c.name.as_str())
}

pub fn payee_name<'a>(state: &'a RootState, id: &PayeeId) -> Option<&'a str> {
    state
        .payees
        .data
        .iter()
        .find(|p| &p.id == id)
        .map(|p| p.name.as_str())
}

/// Names of the tags on `transaction`, in order. Tags the server embedded are used as is,
/// others are looked up in the tags slice; unknown tags are skipped.
pub fn tag_names<'a>(state: &'a RootState, transaction: &'a Transaction) -> Vec<&'a str> {
    transaction
        .tags
        .iter()
        .filter_map(|assigned| match &assigned.tag {
            Some(tag) => Some(tag.name.as_str()),
            None => state
                .tags
                .data
                .iter()
                .find(|t| t.id == assigned.tag_id)
                .map(|t| t.name.as_str()),
        })
        .collect()
}

pub fn accounts_in_currency(state: &RootState, currency: Currency) -> Vec<&Account> {
    state
        .accounts
        .accounts
        .iter()
        .filter(|a| a.currency == currency)
        .collect()
}

pub fn is_authenticated(state: &RootState) -> bool {
    state.user.token.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, CategoryType, Tag, TagId, TransactionTag};
    use crate::store::{Action, ListPayload, Store};
    use crate::test::{account, amount, page, tag, total, withdrawal};

    fn store() -> Store {
        let store = Store::new();
        let mut credit = account("c", "-20");
        credit.is_credit = true;
        credit.currency = Currency::Uah;
        store.dispatch(Action::SetAccounts(vec![account("a", "100"), credit]));
        store.dispatch(Action::SetSelectedAccount(Some(AccountId::new("a"))));
        store.dispatch(Action::SetList(ListPayload::Tags(vec![
            tag("1", "food"),
            tag("2", "trip"),
        ])));
        store.dispatch(Action::SetList(ListPayload::Categories(vec![Category {
            id: CategoryId::new("cat"),
            name: "Groceries".to_string(),
            kind: CategoryType::Custom,
        }])));
        store
    }

    #[test]
    fn selection() {
        let store = store();
        let name = store.select(|s| selected_account(s).map(|a| a.name.clone()));
        assert_eq!(name.as_deref(), Some("Account a"));
        assert!(store.select(|s| account_by_id(s, &AccountId::new("zzz")).is_none()));
    }

    #[test]
    fn withdrawal_eligibility() {
        let state = store().state();
        let a = AccountId::new("a");
        let c = AccountId::new("c");
        assert!(can_withdraw(&state, &a, amount("100")));
        assert!(!can_withdraw(&state, &a, amount("100.01")));
        assert!(can_withdraw(&state, &c, amount("5000")));
        assert!(!can_withdraw(&state, &AccountId::new("x"), amount("1")));
    }

    #[test]
    fn paging() {
        let mut state = store().state();
        state.accounts.apply_page(
            &AccountId::new("a"),
            true,
            page(vec![withdrawal("t1", "a", "1", 1)], 2),
        );
        assert!(has_more_transactions(&state));
        assert_eq!(transactions_feed(&state).len(), 1);
        state.accounts.count = 1;
        assert!(!has_more_transactions(&state));
    }

    #[test]
    fn names() {
        let state = store().state();
        assert_eq!(
            category_name(&state, &CategoryId::new("cat")),
            Some("Groceries")
        );
        assert_eq!(payee_name(&state, &PayeeId::new("p")), None);

        let mut transaction = withdrawal("t1", "a", "1", 1);
        transaction.tags = vec![
            TransactionTag {
                tag_id: TagId::new("2"),
                tag: None,
                assigned_at: None,
            },
            TransactionTag {
                tag_id: TagId::new("9"),
                tag: Some(Tag {
                    id: TagId::new("9"),
                    name: "embedded".to_string(),
                }),
                assigned_at: None,
            },
            TransactionTag {
                tag_id: TagId::new("404"),
                tag: None,
                assigned_at: None,
            },
        ];
        assert_eq!(tag_names(&state, &transaction), ["trip", "embedded"]);
    }

    #[test]
    fn currency_and_session() {
        let mut state = store().state();
        assert_eq!(accounts_in_currency(&state, Currency::Uah).len(), 1);
        assert!(accounts_in_currency(&state, Currency::Btc).is_empty());
        assert!(current_total_balance(&state).is_none());
        state.balance.data = vec![total(2024, 1, "1"), total(2024, 2, "2")];
        assert_eq!(current_total_balance(&state).unwrap().month, 2);

        assert!(!is_authenticated(&state));
        state.user.token = Some("t".to_string());
        assert!(is_authenticated(&state));
    }
}
