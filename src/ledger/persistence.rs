//! Saves and loads the whole transaction collection as one JSON value.
//!
//! Every operation here is best-effort: failures are logged and never returned
//! to the caller, so the in-memory collection stays the source of truth.

use std::sync::Arc;

use crate::{Error, ledger::Transaction, local_storage::KeyValueStore};

/// The key the transaction collection is stored under.
pub const STORAGE_KEY: &str = "household_transactions";

/// Persists the transaction collection to a [KeyValueStore].
#[derive(Debug, Clone)]
pub struct TransactionStorage {
    store: Arc<dyn KeyValueStore>,
}

impl TransactionStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrite the stored collection with `transactions`.
    ///
    /// Errors are logged and otherwise ignored.
    pub fn save(&self, transactions: &[Transaction]) {
        let result = serde_json::to_string(transactions)
            .map_err(|error| Error::JsonError(error.to_string()))
            .and_then(|json| self.store.set_item(STORAGE_KEY, &json));

        if let Err(error) = result {
            tracing::error!("could not save transactions: {error}");
        }
    }

    /// Load the stored collection.
    ///
    /// Returns an empty collection if nothing has been saved yet, or if the
    /// stored value cannot be read or is not a JSON array. Individual records
    /// that cannot be read are skipped.
    pub fn load(&self) -> Vec<Transaction> {
        let json = match self.store.get_item(STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(error) => {
                tracing::error!("could not load transactions: {error}");
                return Vec::new();
            }
        };

        match parse_transactions(&json) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::warn!("stored transactions are malformed, starting empty: {error}");
                Vec::new()
            }
        }
    }

    /// Remove the stored collection.
    ///
    /// Errors are logged and otherwise ignored.
    pub fn clear(&self) {
        if let Err(error) = self.store.remove_item(STORAGE_KEY) {
            tracing::error!("could not clear transactions: {error}");
        }
    }
}

/// Parse the stored array one record at a time.
///
/// Records that cannot be read, or that repeat an earlier ID, are logged and
/// skipped so that the rest of the collection survives.
fn parse_transactions(json: &str) -> Result<Vec<Transaction>, Error> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|error| Error::JsonError(error.to_string()))?;

    let serde_json::Value::Array(records) = value else {
        return Err(Error::JsonError("expected a JSON array".to_owned()));
    };

    let mut transactions: Vec<Transaction> = Vec::with_capacity(records.len());

    for (index, mut record) in records.into_iter().enumerate() {
        fill_missing_updated_at(&mut record);

        match serde_json::from_value::<Transaction>(record) {
            Ok(transaction) if transactions.iter().any(|other| other.id == transaction.id) => {
                tracing::warn!(
                    "skipping stored transaction {index}: duplicate ID {}",
                    transaction.id
                );
            }
            Ok(transaction) => transactions.push(transaction),
            Err(error) => tracing::warn!("skipping stored transaction {index}: {error}"),
        }
    }

    Ok(transactions)
}

/// Records saved without `updatedAt` were never edited, so it equals `createdAt`.
fn fill_missing_updated_at(record: &mut serde_json::Value) {
    let Some(object) = record.as_object_mut() else {
        return;
    };

    if !object.contains_key("updatedAt") {
        if let Some(created_at) = object.get("createdAt").cloned() {
            object.insert("updatedAt".to_owned(), created_at);
        }
    }
}
