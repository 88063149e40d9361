//! Defines the endpoint for adding a transaction to the ledger.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    endpoints,
    ledger::{
        LedgerEndpointState, add_transaction, form::TransactionForm, lock_ledger, now_millis,
    },
};

/// A route handler for adding a transaction, redirects to the ledger page on success.
///
/// Invalid input is answered with an alert and leaves the ledger untouched.
pub async fn create_transaction_endpoint(
    State(state): State<LedgerEndpointState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(error) => {
            tracing::debug!("rejected new transaction: {error}");
            return error.into_alert_response();
        }
    };

    let mut ledger = match lock_ledger(&state.ledger) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    ledger.transactions = add_transaction(&ledger.transactions, input, now_millis());
    state.storage.save(&ledger.transactions);
    tracing::info!(
        "added transaction, ledger has {} transactions",
        ledger.transactions.len()
    );

    (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::SEE_OTHER).into_response()
}
