//! Alert messages shown to the user after an action fails.
//!
//! Alerts are rendered into the page's alert container by htmx, see
//! [crate::html::base].

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

const ALERT_ERROR_STYLE: &str = "flex items-start gap-3 p-4 mb-4 text-sm rounded-lg shadow-lg \
    text-red-800 bg-red-50 border border-red-300 \
    dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

/// An alert message.
#[derive(Debug, Clone)]
pub enum Alert {
    /// An error with a message and details on how to fix it.
    Error { message: String, details: String },
    /// An error with only a message.
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }

    fn into_markup(self) -> Markup {
        let (message, details) = match self {
            Alert::Error { message, details } => (message, Some(details)),
            Alert::ErrorSimple { message } => (message, None),
        };

        html! {
            div
                role="alert"
                class=(ALERT_ERROR_STYLE)
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if let Some(details) = details {
                        @if !details.is_empty() {
                            span class="block mt-1" { (details) }
                        }
                    }
                }

                button
                    type="button"
                    aria-label="閉じる"
                    class="font-bold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let html = Alert::Error {
            message: "Oops".to_owned(),
            details: "Try again".to_owned(),
        }
        .into_html()
        .0;

        let fragment = Html::parse_fragment(&html);
        let message = fragment
            .select(&Selector::parse("p").unwrap())
            .next()
            .expect("No message found")
            .text()
            .collect::<String>();
        let details = fragment
            .select(&Selector::parse("span").unwrap())
            .next()
            .expect("No details found")
            .text()
            .collect::<String>();

        assert_eq!(message, "Oops");
        assert_eq!(details, "Try again");
    }

    #[test]
    fn simple_alert_has_no_details() {
        let html = Alert::ErrorSimple {
            message: "Oops".to_owned(),
        }
        .into_html()
        .0;

        let fragment = Html::parse_fragment(&html);

        assert!(
            fragment
                .select(&Selector::parse("span").unwrap())
                .next()
                .is_none()
        );
    }
}
