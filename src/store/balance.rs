//! The balance slice: the user's total balance per month.

use crate::model::TotalBalance;
use crate::store::Slice;

/// Monthly totals in chronological order.
pub type BalanceState = Slice<Vec<TotalBalance>>;

pub(crate) fn set_rows(state: &mut BalanceState, mut rows: Vec<TotalBalance>) {
    rows.sort_by_key(TotalBalance::period);
    state.data = rows;
}

/// Replaces the row for the same month, or adds it.
pub(crate) fn upsert_total(state: &mut BalanceState, total: TotalBalance) {
    match state
        .data
        .iter_mut()
        .find(|row| row.period() == total.period())
    {
        Some(row) => *row = total,
        None => {
            state.data.push(total);
            state.data.sort_by_key(TotalBalance::period);
        }
    }
}

/// The row of the most recent month.
pub(crate) fn latest(state: &BalanceState) -> Option<&TotalBalance> {
    state.data.iter().max_by_key(|row| row.period())
}
