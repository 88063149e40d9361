//! Pure functions that map a collection of transactions and a user intent to a new collection.
//!
//! None of these functions fail. Intents that refer to a transaction that is
//! not in the collection leave the collection as it was.

use crate::ledger::{
    Timestamp, Transaction, TransactionId, TransactionInput, TransactionPatch,
};

/// Append a new transaction built from `input` to the end of `transactions`.
///
/// The new transaction gets a fresh ID that is not used by any transaction in
/// `transactions`, and both of its timestamps are set to `now`.
pub fn add_transaction(
    transactions: &[Transaction],
    input: TransactionInput,
    now: Timestamp,
) -> Vec<Transaction> {
    let id = loop {
        let candidate = TransactionId::new_random();

        if !transactions.iter().any(|transaction| transaction.id == candidate) {
            break candidate;
        }
    };

    let mut updated = Vec::with_capacity(transactions.len() + 1);
    updated.extend_from_slice(transactions);
    updated.push(Transaction {
        id,
        date: input.date,
        transaction_type: input.transaction_type,
        amount: input.amount,
        category: input.category,
        memo: input.memo,
        created_at: now,
        updated_at: now,
    });

    updated
}

/// Overlay the fields set in `patch` onto the transaction with `id` and set its
/// `updated_at` to `now`.
///
/// The ID and creation time are never changed. If no transaction has `id`,
/// the returned collection equals `transactions`.
pub fn update_transaction(
    transactions: &[Transaction],
    id: &TransactionId,
    patch: TransactionPatch,
    now: Timestamp,
) -> Vec<Transaction> {
    let Some(position) = transactions
        .iter()
        .position(|transaction| &transaction.id == id)
    else {
        tracing::debug!("ignoring update for unknown transaction {id}");
        return transactions.to_vec();
    };

    let mut updated = transactions.to_vec();
    let old = &transactions[position];

    updated[position] = Transaction {
        id: old.id.clone(),
        date: patch.date.unwrap_or_else(|| old.date.clone()),
        transaction_type: patch.transaction_type.unwrap_or(old.transaction_type),
        amount: patch.amount.unwrap_or(old.amount),
        category: patch.category.unwrap_or(old.category),
        memo: patch.memo.unwrap_or_else(|| old.memo.clone()),
        created_at: old.created_at,
        updated_at: now,
    };

    updated
}

/// Remove the transaction with `id`, keeping the order of the rest.
pub fn delete_transaction(transactions: &[Transaction], id: &TransactionId) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| &transaction.id != id)
        .cloned()
        .collect()
}
