//! Transaction deletion endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    endpoints,
    ledger::{LedgerEndpointState, TransactionId, delete_transaction, lock_ledger},
};

/// Delete the transaction with `transaction_id`, redirects to the ledger page.
///
/// The page asks the user to confirm before sending this request. Deleting an
/// unknown ID changes nothing.
pub async fn delete_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<LedgerEndpointState>,
) -> Response {
    let mut ledger = match lock_ledger(&state.ledger) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    ledger.transactions = delete_transaction(&ledger.transactions, &transaction_id);

    if ledger.editing_id.as_ref() == Some(&transaction_id) {
        ledger.editing_id = None;
    }

    state.storage.save(&ledger.transactions);
    tracing::info!("deleted transaction {transaction_id}");

    (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::SEE_OTHER).into_response()
}

/// Delete every transaction and the stored collection.
pub async fn clear_transactions_endpoint(State(state): State<LedgerEndpointState>) -> Response {
    let mut ledger = match lock_ledger(&state.ledger) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    let count = ledger.transactions.len();
    ledger.transactions.clear();
    ledger.editing_id = None;
    state.storage.clear();
    tracing::info!("cleared {count} transactions");

    (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::SEE_OTHER).into_response()
}
