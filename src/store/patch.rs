//! Applies confirmed mutations that touch more than one entity.
//!
//! Every function here runs after the server accepted a mutation and patches all the state the
//! mutation affects: the transaction feed, account balances and the user's total balance. The
//! server's numbers are used wherever the response carries them.

use crate::model::{
    AccountCreated, AccountDeleted, Transaction, TransactionOutcome, TransferOutcome,
};
use crate::store::{balance, RootState};

pub(crate) fn account_created(state: &mut RootState, created: AccountCreated) {
    state.accounts.upsert_account(created.account);
    balance::upsert_total(&mut state.balance, created.total_balance);
}

pub(crate) fn account_deleted(state: &mut RootState, deleted: AccountDeleted) {
    state.accounts.remove_account(&deleted.deleted_account.id);
    balance::upsert_total(&mut state.balance, deleted.user_balance);
}

/// The transaction joins the feed if it belongs to the selected account. Its account takes the
/// returned balance either way.
pub(crate) fn transaction_created(state: &mut RootState, outcome: TransactionOutcome) {
    let TransactionOutcome {
        transaction,
        balance,
    } = outcome;
    state
        .accounts
        .set_balance(&transaction.from_account_id, balance);
    if state.accounts.belongs_to_feed(&transaction) {
        state.accounts.prepend(transaction);
    }
}

pub(crate) fn transaction_updated(state: &mut RootState, outcome: TransactionOutcome) {
    let TransactionOutcome {
        transaction,
        balance,
    } = outcome;
    state
        .accounts
        .set_balance(&transaction.from_account_id, balance);
    state.accounts.place(transaction);
}

pub(crate) fn transaction_deleted(state: &mut RootState, outcome: TransactionOutcome) {
    let TransactionOutcome {
        transaction,
        balance,
    } = outcome;
    state
        .accounts
        .set_balance(&transaction.from_account_id, balance);
    state.accounts.remove_transaction(&transaction.id);
}

/// A new transfer only carries the transaction, so both balances are derived from it: the
/// sender loses `amount`, the receiver gains the converted amount when the currencies differ and
/// `amount` otherwise.
pub(crate) fn transfer_created(state: &mut RootState, transaction: Transaction) {
    state
        .accounts
        .adjust_balance(&transaction.from_account_id, -transaction.amount);
    if let Some(to) = &transaction.to_account_id {
        state
            .accounts
            .adjust_balance(to, transaction.credited_amount());
    }
    if state.accounts.belongs_to_feed(&transaction) {
        state.accounts.prepend(transaction);
    }
}

pub(crate) fn transfer_updated(state: &mut RootState, outcome: TransferOutcome) {
    let TransferOutcome {
        transaction,
        from_account,
        to_account,
    } = outcome;
    state
        .accounts
        .set_balance(&from_account.id, from_account.balance);
    state.accounts.set_balance(&to_account.id, to_account.balance);
    state.accounts.place(transaction);
}

pub(crate) fn transfer_deleted(state: &mut RootState, outcome: TransferOutcome) {
    let TransferOutcome {
        transaction,
        from_account,
        to_account,
    } = outcome;
    state
        .accounts
        .set_balance(&from_account.id, from_account.balance);
    state.accounts.set_balance(&to_account.id, to_account.balance);
    state.accounts.remove_transaction(&transaction.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountBalance, AccountId, Currency};
    use crate::store::{balance, Action, Store};
    use crate::test::{account, amount, page, total, transfer, withdrawal};

    fn balance_of(state: &RootState, id: &str) -> crate::model::Amount {
        state
            .accounts
            .accounts
            .iter()
            .find(|a| a.id.as_str() == id)
            .map(|a| a.balance)
            .unwrap()
    }

    fn with_feed() -> RootState {
        let store = Store::new();
        store.dispatch(Action::SetAccounts(vec![account("a", "100"), account("b", "50")]));
        store.dispatch(Action::SetSelectedAccount(Some(AccountId::new("a"))));
        let mut state = store.state();
        state.accounts.apply_page(
            &AccountId::new("a"),
            true,
            page(vec![withdrawal("t1", "a", "10", 1)], 1),
        );
        state
    }

    #[test]
    fn created_on_selected_account_is_prepended() {
        let mut state = with_feed();
        transaction_created(
            &mut state,
            TransactionOutcome {
                transaction: withdrawal("t2", "a", "5", 2),
                balance: amount("95"),
            },
        );
        assert_eq!(state.accounts.transactions[0].id.as_str(), "t2");
        assert_eq!(state.accounts.count, 2);
        assert_eq!(balance_of(&state, "a"), amount("95"));
    }

    #[test]
    fn created_on_other_account_only_moves_its_balance() {
        let mut state = with_feed();
        let feed = state.accounts.transactions.clone();
        transaction_created(
            &mut state,
            TransactionOutcome {
                transaction: withdrawal("t2", "b", "5", 2),
                balance: amount("45"),
            },
        );
        assert_eq!(state.accounts.transactions, feed);
        assert_eq!(balance_of(&state, "b"), amount("45"));
        assert_eq!(balance_of(&state, "a"), amount("100"));
    }

    #[test]
    fn deleted_removes_exactly_one() {
        let mut state = with_feed();
        transaction_created(
            &mut state,
            TransactionOutcome {
                transaction: withdrawal("t2", "a", "5", 2),
                balance: amount("95"),
            },
        );
        transaction_deleted(
            &mut state,
            TransactionOutcome {
                transaction: withdrawal("t1", "a", "10", 1),
                balance: amount("105"),
            },
        );
        let ids: Vec<&str> = state
            .accounts
            .transactions
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["t2"]);
        assert_eq!(state.accounts.count, 1);
        assert_eq!(balance_of(&state, "a"), amount("105"));
    }

    #[test]
    fn cross_currency_transfer_uses_both_amounts() {
        let mut state = with_feed();
        transfer_created(&mut state, transfer("x", "a", "b", "10", Some("410"), 3));
        assert_eq!(balance_of(&state, "a"), amount("90"));
        assert_eq!(balance_of(&state, "b"), amount("460"));
        assert_eq!(state.accounts.transactions[0].id.as_str(), "x");
    }

    #[test]
    fn same_currency_transfer_uses_one_amount() {
        let mut state = with_feed();
        transfer_created(&mut state, transfer("x", "b", "a", "20", None, 3));
        assert_eq!(balance_of(&state, "b"), amount("30"));
        assert_eq!(balance_of(&state, "a"), amount("120"));
    }

    #[test]
    fn transfer_edits_take_server_balances() {
        let mut state = with_feed();
        transfer_created(&mut state, transfer("x", "a", "b", "10", None, 3));
        let outcome = TransferOutcome {
            transaction: transfer("x", "a", "b", "15", None, 3),
            from_account: AccountBalance {
                id: AccountId::new("a"),
                balance: amount("85"),
            },
            to_account: AccountBalance {
                id: AccountId::new("b"),
                balance: amount("65"),
            },
        };
        transfer_updated(&mut state, outcome.clone());
        assert_eq!(balance_of(&state, "a"), amount("85"));
        assert_eq!(balance_of(&state, "b"), amount("65"));
        assert_eq!(state.accounts.transactions[0].amount, amount("15"));

        transfer_deleted(&mut state, outcome);
        assert!(state.accounts.transactions.iter().all(|t| t.id.as_str() != "x"));
    }

    #[test]
    fn account_lifecycle_patches_total_balance() {
        let mut state = with_feed();
        let mut created = account("c", "7");
        created.currency = Currency::Eur;
        account_created(
            &mut state,
            AccountCreated {
                account: created.clone(),
                total_balance: total(2024, 6, "157"),
            },
        );
        assert_eq!(state.accounts.accounts.len(), 3);
        assert_eq!(
            balance::latest(&state.balance).unwrap().balance,
            amount("157")
        );

        account_deleted(
            &mut state,
            AccountDeleted {
                deleted_account: account("a", "100"),
                user_balance: total(2024, 6, "57"),
            },
        );
        assert!(state.accounts.selected.is_none());
        assert!(state.accounts.transactions.is_empty());
        assert_eq!(state.balance.data.len(), 1);
        assert_eq!(state.balance.data[0].balance, amount("57"));
    }
}
