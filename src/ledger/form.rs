//! The transaction form: its fields, and validation of submitted values.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{
    Error,
    html::{FORM_INLINE_INPUT_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    ledger::{Amount, Category, TransactionInput, TransactionType},
};

/// The form data for adding or updating a transaction.
///
/// The amount is kept as text so that invalid input can be reported to the
/// user instead of being rejected by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    /// The date when the transaction ocurred, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount in whole yen as typed by the user.
    #[serde(default)]
    pub amount: String,
    pub category: Category,
    #[serde(default)]
    pub memo: String,
}

impl TransactionForm {
    /// Validate the form.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is not a positive whole number,
    /// - or [Error::InvalidDate] if the date is not a `YYYY-MM-DD` calendar date.
    pub fn into_input(self) -> Result<TransactionInput, Error> {
        let amount: Amount = self.amount.parse()?;
        let date = parse_date(&self.date)?;

        Ok(TransactionInput {
            date: date.to_string(),
            transaction_type: self.transaction_type,
            amount,
            category: self.category,
            memo: self.memo,
        })
    }
}

fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// The values the transaction form fields start with.
pub struct TransactionFormDefaults<'a> {
    pub date: &'a str,
    pub transaction_type: TransactionType,
    pub amount: Option<Amount>,
    pub category: Category,
    pub memo: &'a str,
}

/// Labelled fields for the add form.
pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    html! {
        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "日付"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="type"
                class=(FORM_LABEL_STYLE)
            {
                "種別"
            }

            (transaction_type_select("type", defaults.transaction_type, FORM_TEXT_INPUT_STYLE))
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "金額"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="1"
                    min="1"
                    placeholder="1000"
                    required
                    value=[defaults.amount.map(Amount::get)]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "カテゴリ"
            }

            (category_select("category", defaults.category, FORM_TEXT_INPUT_STYLE))
        }

        div
        {
            label
                for="memo"
                class=(FORM_LABEL_STYLE)
            {
                "メモ"
            }

            input
                name="memo"
                id="memo"
                type="text"
                placeholder="コンビニでランチ"
                value=(defaults.memo)
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// Unlabelled table cells for editing a transaction in place.
///
/// The cells hold the same field names as [transaction_form_fields] so the
/// row can be submitted with `hx-include`.
pub fn transaction_edit_cells(defaults: &TransactionFormDefaults<'_>, cell_style: &str) -> Markup {
    html! {
        td class=(cell_style)
        {
            input
                name="date"
                type="date"
                aria-label="日付"
                value=(defaults.date)
                required
                class=(FORM_INLINE_INPUT_STYLE);
        }

        td class=(cell_style)
        {
            (transaction_type_select("", defaults.transaction_type, FORM_INLINE_INPUT_STYLE))
        }

        td class=(cell_style)
        {
            (category_select("", defaults.category, FORM_INLINE_INPUT_STYLE))
        }

        td class=(cell_style)
        {
            input
                name="amount"
                type="number"
                aria-label="金額"
                step="1"
                min="1"
                required
                value=[defaults.amount.map(Amount::get)]
                class={(FORM_INLINE_INPUT_STYLE) " text-right"};
        }

        td class=(cell_style)
        {
            input
                name="memo"
                type="text"
                aria-label="メモ"
                placeholder="メモ"
                value=(defaults.memo)
                class=(FORM_INLINE_INPUT_STYLE);
        }
    }
}

/// A select for the transaction type. An empty `id` omits the id attribute.
fn transaction_type_select(id: &str, selected: TransactionType, style: &str) -> Markup {
    html! {
        select
            name="type"
            id=[(!id.is_empty()).then_some(id)]
            aria-label="種別"
            class=(style)
        {
            @for transaction_type in [TransactionType::Expense, TransactionType::Income] {
                option
                    value=(transaction_type.as_str())
                    selected[transaction_type == selected]
                {
                    (transaction_type.label())
                }
            }
        }
    }
}

/// A select for the category. An empty `id` omits the id attribute.
fn category_select(id: &str, selected: Category, style: &str) -> Markup {
    html! {
        select
            name="category"
            id=[(!id.is_empty()).then_some(id)]
            aria-label="カテゴリ"
            class=(style)
        {
            @for category in Category::ALL {
                option
                    value=(category.as_str())
                    selected[category == selected]
                {
                    (category.as_str())
                }
            }
        }
    }
}
