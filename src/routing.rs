//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    ledger::{
        cancel_edit_endpoint, clear_transactions_endpoint, create_transaction_endpoint,
        delete_transaction_endpoint, get_ledger_page, start_edit_endpoint,
        update_transaction_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_ledger_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint).delete(clear_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::EDIT_TRANSACTION, post(start_edit_endpoint))
        .route(endpoints::CANCEL_EDIT, post(cancel_edit_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use rusqlite::Connection;
    use tower::ServiceExt;

    use crate::{
        AppState, build_router, endpoints,
        ledger::{Amount, Category, Transaction, TransactionId, TransactionType},
        local_storage::SQLiteKeyValueStore,
        test_utils::{assert_content_type, assert_hx_redirect, assert_valid_html, parse_html_document},
    };

    fn get_test_router() -> (Router, AppState) {
        let connection = Connection::open_in_memory().unwrap();
        let store = SQLiteKeyValueStore::new(Arc::new(Mutex::new(connection))).unwrap();
        let state = AppState::new(Arc::new(store), "Etc/UTC");

        (build_router(state.clone()), state)
    }

    #[tokio::test]
    async fn root_serves_ledger_page() {
        let (router, _) = get_test_router();

        let response = router
            .oneshot(Request::get(endpoints::ROOT).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (router, _) = get_test_router();

        let response = router
            .oneshot(Request::get("/does-not-exist").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    fn post_expense(amount: &str) -> Request<Body> {
        Request::post(endpoints::TRANSACTIONS_API)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(format!(
                "date=2024-02-01&type=expense&amount={amount}&category=%E5%AE%B6%E8%B3%83&memo="
            )))
            .unwrap()
    }

    #[tokio::test]
    async fn huge_amounts_never_take_down_the_page() {
        let (router, state) = get_test_router();

        let response = router
            .clone()
            .oneshot(post_expense("18446744073709551615"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        for _ in 0..2 {
            let response = router
                .clone()
                .oneshot(post_expense("9007199254740991"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
        }

        for _ in 0..2 {
            let response = router
                .clone()
                .oneshot(Request::get(endpoints::ROOT).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(state.storage.load().len(), 2);
    }

    #[tokio::test]
    async fn deletes_transaction_with_reserved_characters_in_id() {
        let (router, state) = get_test_router();
        let id = "a/b c?";
        state.ledger.lock().unwrap().transactions = vec![Transaction {
            id: TransactionId::from(id),
            date: "2024-01-01".to_owned(),
            transaction_type: TransactionType::Expense,
            amount: Amount::new_unchecked(100),
            category: Category::Other,
            memo: String::new(),
            created_at: 0,
            updated_at: 0,
        }];

        let uri = endpoints::format_endpoint(endpoints::TRANSACTION, id);
        let response = router
            .oneshot(Request::delete(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(state.ledger.lock().unwrap().transactions.is_empty());
    }

    #[tokio::test]
    async fn posting_form_adds_transaction() {
        let (router, state) = get_test_router();
        let body = "date=2024-02-01&type=expense&amount=980&category=%E9%A3%9F%E8%B2%BB&memo=";

        let response = router
            .oneshot(
                Request::post(endpoints::TRANSACTIONS_API)
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::ROOT);
        assert_eq!(state.ledger.lock().unwrap().transactions.len(), 1);
    }
}
