//! The in-memory ledger shared by the route handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;

use crate::{
    AppState, Error,
    ledger::{Transaction, TransactionId, persistence::TransactionStorage},
};

/// The transactions and the one piece of UI state: which row is being edited.
///
/// While the server runs this is the source of truth. It is written to
/// storage after every change but never re-read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    /// The ID of the transaction shown as an inline edit form, if any.
    pub editing_id: Option<TransactionId>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            editing_id: None,
        }
    }

    pub fn contains(&self, id: &TransactionId) -> bool {
        self.transactions
            .iter()
            .any(|transaction| &transaction.id == id)
    }
}

/// Acquire the ledger lock, logging and converting a poisoned lock into an [Error].
pub fn lock_ledger(ledger: &Mutex<Ledger>) -> Result<MutexGuard<'_, Ledger>, Error> {
    ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)
}

/// The state needed by the endpoints that change the ledger.
#[derive(Debug, Clone)]
pub struct LedgerEndpointState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub storage: TransactionStorage,
}

impl FromRef<AppState> for LedgerEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            storage: state.storage.clone(),
        }
    }
}
