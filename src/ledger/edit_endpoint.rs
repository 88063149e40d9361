//! Endpoints for editing a transaction in place: start, cancel and save an edit.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    endpoints,
    ledger::{
        LedgerEndpointState, TransactionId, form::TransactionForm, lock_ledger, now_millis,
        update_transaction,
    },
};

fn redirect_to_ledger() -> Response {
    (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::SEE_OTHER).into_response()
}

/// Show the transaction with `transaction_id` as an inline edit form.
///
/// Only one transaction is edited at a time, so this replaces any edit in
/// progress. Unknown IDs are ignored.
pub async fn start_edit_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<LedgerEndpointState>,
) -> Response {
    let mut ledger = match lock_ledger(&state.ledger) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    if ledger.contains(&transaction_id) {
        ledger.editing_id = Some(transaction_id);
    } else {
        tracing::debug!("ignoring edit for unknown transaction {transaction_id}");
    }

    redirect_to_ledger()
}

/// Leave edit mode without changing any transaction.
pub async fn cancel_edit_endpoint(State(state): State<LedgerEndpointState>) -> Response {
    let mut ledger = match lock_ledger(&state.ledger) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    ledger.editing_id = None;

    redirect_to_ledger()
}

/// Save the edited fields of the transaction with `transaction_id` and leave edit mode.
///
/// Invalid input is answered with an alert and the row stays in edit mode.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<LedgerEndpointState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(error) => {
            tracing::debug!("rejected update for transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    };

    let mut ledger = match lock_ledger(&state.ledger) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    ledger.transactions = update_transaction(
        &ledger.transactions,
        &transaction_id,
        input.into(),
        now_millis(),
    );
    ledger.editing_id = None;
    state.storage.save(&ledger.transactions);

    redirect_to_ledger()
}
