//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use crate::{
    ledger::{Ledger, TransactionStorage},
    local_storage::KeyValueStore,
};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions and which one is being edited.
    pub ledger: Arc<Mutex<Ledger>>,

    /// Where the transactions are saved after every change.
    pub storage: TransactionStorage,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState], loading any transactions saved in `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Tokyo".
    pub fn new(store: Arc<dyn KeyValueStore>, local_timezone: &str) -> Self {
        let storage = TransactionStorage::new(store);
        let transactions = storage.load();
        tracing::info!("loaded {} transactions", transactions.len());

        Self {
            ledger: Arc::new(Mutex::new(Ledger::new(transactions))),
            storage,
            local_timezone: local_timezone.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        AppState,
        ledger::{Amount, Category, Transaction, TransactionId, TransactionStorage, TransactionType},
        local_storage::SQLiteKeyValueStore,
    };

    #[test]
    fn loads_saved_transactions_with_no_edit_in_progress() {
        let connection = Connection::open_in_memory().unwrap();
        let store = Arc::new(SQLiteKeyValueStore::new(Arc::new(Mutex::new(connection))).unwrap());
        let saved = vec![Transaction {
            id: TransactionId::from("a"),
            date: "2024-03-01".to_owned(),
            transaction_type: TransactionType::Income,
            amount: Amount::new_unchecked(5000),
            category: Category::Salary,
            memo: String::new(),
            created_at: 1,
            updated_at: 1,
        }];
        TransactionStorage::new(store.clone()).save(&saved);

        let state = AppState::new(store, "Asia/Tokyo");

        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.transactions, saved);
        assert_eq!(ledger.editing_id, None);
        assert_eq!(state.local_timezone, "Asia/Tokyo");
    }
}
