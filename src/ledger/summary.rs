//! Derived views of the ledger: totals, display order and the expense breakdown by category.
//!
//! Everything here is recomputed from the full collection on each call.

use crate::ledger::{Category, Transaction, TransactionType};

/// The income, expense and balance totals of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: u64,
    pub expense: u64,
    /// Income minus expenses, negative when more was spent than earned.
    pub balance: i128,
}

impl Totals {
    pub fn new(transactions: &[Transaction]) -> Self {
        let income = total_of_type(transactions, TransactionType::Income);
        let expense = total_of_type(transactions, TransactionType::Expense);

        Self {
            income,
            expense,
            balance: i128::from(income) - i128::from(expense),
        }
    }
}

/// Sum the amounts of every transaction of `transaction_type`, saturating at `u64::MAX`.
pub fn total_of_type(transactions: &[Transaction], transaction_type: TransactionType) -> u64 {
    transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
        .fold(0, |total, transaction| {
            total.saturating_add(transaction.amount.get())
        })
}

/// Order transactions by date, newest first.
///
/// Dates are compared as strings. Transactions on the same date keep their
/// relative order.
pub fn sort_by_date_descending(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    // `sort_by` is stable.
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Sum expenses per category in the order categories are first encountered.
///
/// Categories without any expenses are left out.
pub fn expense_totals_by_category(transactions: &[Transaction]) -> Vec<(Category, u64)> {
    let mut totals: Vec<(Category, u64)> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense)
    {
        match totals
            .iter_mut()
            .find(|(category, _)| *category == transaction.category)
        {
            Some((_, total)) => *total = total.saturating_add(transaction.amount.get()),
            None => totals.push((transaction.category, transaction.amount.get())),
        }
    }

    totals
}

/// [expense_totals_by_category] ordered by total, largest first.
///
/// Categories with equal totals keep their encounter order.
pub fn sorted_expense_totals_by_category(transactions: &[Transaction]) -> Vec<(Category, u64)> {
    let mut totals = expense_totals_by_category(transactions);
    totals.sort_by(|(_, a), (_, b)| b.cmp(a));
    totals
}

/// The share of `amount` in `total_expense` as a whole percentage.
///
/// Returns 0 when `total_expense` is 0.
pub fn percentage(amount: u64, total_expense: u64) -> u64 {
    if total_expense == 0 {
        return 0;
    }

    (amount as f64 / total_expense as f64 * 100.0).round() as u64
}
