//! The accounts slice: the account list, the selected account and its transaction feed.

use crate::model::{Account, AccountId, Amount, Transaction, TransactionId, TransactionPage};
use crate::store::{remove_by_id, upsert_by_id, Status};
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AccountsState {
    pub accounts: Vec<Account>,
    pub selected: Option<AccountId>,
    /// Transactions of the selected account, newest first.
    pub transactions: Vec<Transaction>,
    /// The server-reported number of transactions of the selected account.
    pub count: u64,
    pub status: Status,
}

impl AccountsState {
    pub fn is_selected(&self, account_id: &AccountId) -> bool {
        self.selected.as_ref() == Some(account_id)
    }

    /// Whether `transaction` belongs in the feed of the selected account.
    pub fn belongs_to_feed(&self, transaction: &Transaction) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|selected| transaction.touches(selected))
    }

    pub(crate) fn select(&mut self, account_id: Option<AccountId>) {
        self.selected = account_id;
        self.transactions.clear();
        self.count = 0;
    }

    /// Replaces the account list, dropping the selection if its account is gone.
    pub(crate) fn set_accounts(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
        if let Some(selected) = &self.selected {
            if !self.accounts.iter().any(|a| &a.id == selected) {
                debug!("Selected account {selected} no longer exists");
                self.select(None);
            }
        }
    }

    pub(crate) fn upsert_account(&mut self, account: Account) {
        upsert_by_id(&mut self.accounts, account);
    }

    pub(crate) fn remove_account(&mut self, account_id: &AccountId) -> Option<Account> {
        if self.is_selected(account_id) {
            self.select(None);
        }
        remove_by_id(&mut self.accounts, account_id)
    }

    /// Overwrites an account's balance with a server-computed value.
    pub(crate) fn set_balance(&mut self, account_id: &AccountId, balance: Amount) {
        match self.accounts.iter_mut().find(|a| &a.id == account_id) {
            Some(account) => account.balance = balance,
            None => debug!("No account {account_id} to set the balance of"),
        }
    }

    pub(crate) fn adjust_balance(&mut self, account_id: &AccountId, delta: Amount) {
        match self.accounts.iter_mut().find(|a| &a.id == account_id) {
            Some(account) => account.balance = account.balance + delta,
            None => debug!("No account {account_id} to adjust the balance of"),
        }
    }

    /// Merges a page of transactions into the feed. A reset replaces the feed, otherwise the page
    /// is appended without duplicating transactions already shown. Pages for an account that is
    /// no longer selected are dropped.
    pub(crate) fn apply_page(
        &mut self,
        account_id: &AccountId,
        reset: bool,
        page: TransactionPage,
    ) {
        if !self.is_selected(account_id) {
            debug!("Dropping a page of transactions for unselected account {account_id}");
            return;
        }
        if reset {
            self.transactions = page.transactions;
        } else {
            for transaction in page.transactions {
                if !self.transactions.iter().any(|t| t.id == transaction.id) {
                    self.transactions.push(transaction);
                }
            }
        }
        let shown = self.transactions.len() as u64;
        self.count = page.count.unwrap_or(shown).max(shown);
    }

    pub(crate) fn prepend(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
        self.count += 1;
    }

    /// Puts an edited transaction where it belongs: in place if it is shown and still belongs
    /// to the feed, in date order if it newly belongs, or out of the feed if it no longer does.
    pub(crate) fn place(&mut self, transaction: Transaction) {
        let belongs = self.belongs_to_feed(&transaction);
        let index = self.transactions.iter().position(|t| t.id == transaction.id);
        match index {
            Some(index) if belongs => self.transactions[index] = transaction,
            Some(_) => {
                self.remove_transaction(&transaction.id);
            }
            None if belongs => {
                let index = self
                    .transactions
                    .iter()
                    .position(|t| t.date < transaction.date)
                    .unwrap_or(self.transactions.len());
                self.transactions.insert(index, transaction);
                self.count += 1;
            }
            None => {}
        }
    }

    /// Removes the transaction with `id` from the feed and reports whether it was shown.
    pub(crate) fn remove_transaction(&mut self, id: &TransactionId) -> bool {
        let removed = remove_by_id(&mut self.transactions, id).is_some();
        if removed {
            self.count = self.count.saturating_sub(1);
        }
        removed
    }
}
