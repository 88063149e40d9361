//! The household ledger.
//!
//! This module contains everything related to recording income and expenses:
//! - The `Transaction` model and the pure functions that add, update and delete transactions
//! - Totals and the per-category expense breakdown
//! - Persisting the collection as one JSON value in local storage
//! - The ledger page and the endpoints that change the ledger

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod page;
mod persistence;
mod reducer;
mod state;
mod summary;

pub use core::{
    Amount, Category, Timestamp, Transaction, TransactionId, TransactionInput, TransactionPatch,
    TransactionType, now_millis,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{clear_transactions_endpoint, delete_transaction_endpoint};
pub use edit_endpoint::{cancel_edit_endpoint, start_edit_endpoint, update_transaction_endpoint};
pub use page::get_ledger_page;
pub use persistence::TransactionStorage;
pub use reducer::{add_transaction, delete_transaction, update_transaction};
pub use state::{Ledger, LedgerEndpointState, lock_ledger};
