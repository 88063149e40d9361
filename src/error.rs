//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    internal_server_error::{InternalServerError, get_internal_server_error_redirect},
    not_found::NotFoundError,
};

/// The message shown when an amount is not a positive whole number.
pub const INVALID_AMOUNT_MESSAGE: &str = "金額は1円以上の整数を入力してください";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user entered an amount that is not a positive whole number.
    #[error("\"{0}\" is not a positive whole number")]
    InvalidAmount(String),

    /// The user entered a date that is not of the form `YYYY-MM-DD`.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The key-value store could not complete an operation.
    ///
    /// This error never leaves the persistence layer, where it is logged.
    #[error("storage operation failed: {0}")]
    StorageError(String),

    /// The stored collection could not be converted to or from JSON.
    ///
    /// This error never leaves the persistence layer, where it is logged.
    #[error("could not convert transactions to or from JSON: {0}")]
    JsonError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Could not acquire the lock on the in-memory ledger
    #[error("could not acquire the ledger lock")]
    LedgerLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "タイムゾーンの設定が正しくありません",
                fix: &invalid_timezone_fix(&timezone),
            }
            .into_response(),
            Error::LedgerLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// Lock failures redirect htmx to the error page instead.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::LedgerLockError | Error::DatabaseLockError => {
                return get_internal_server_error_redirect();
            }
            Error::InvalidAmount(_) => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: INVALID_AMOUNT_MESSAGE.to_owned(),
                },
            ),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "日付が正しくありません".to_owned(),
                    details: format!("\"{date}\" は YYYY-MM-DD 形式の日付ではありません"),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "タイムゾーンの設定が正しくありません".to_owned(),
                    details: invalid_timezone_fix(&timezone),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "エラーが発生しました".to_owned(),
                    details: "予期しないエラーが発生しました。詳細はサーバーのログを確認してください。"
                        .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

fn invalid_timezone_fix(timezone: &str) -> String {
    format!(
        "タイムゾーン \"{timezone}\" を読み込めませんでした。\
        サーバーの設定で正しいタイムゾーン名（例: Asia/Tokyo）を指定してください。"
    )
}
