//! The ledger page: summary cards, the add form, the transaction history and the expense breakdown.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_CANCEL_STYLE, BUTTON_DELETE_STYLE, BUTTON_EDIT_STYLE, BUTTON_PRIMARY_STYLE,
        BUTTON_SAVE_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_EDIT_CELL_STYLE, TABLE_EDIT_ROW_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_yen, loading_spinner, yen_input_styles,
    },
    ledger::{
        Category, Ledger, Transaction, TransactionId, TransactionType,
        form::{TransactionFormDefaults, transaction_edit_cells, transaction_form_fields},
        lock_ledger,
        summary::{Totals, percentage, sort_by_date_descending, sorted_expense_totals_by_category},
    },
    timezone::local_today,
};

const INCOME_TEXT_STYLE: &str = "text-green-600 dark:text-green-400";
const EXPENSE_TEXT_STYLE: &str = "text-red-600 dark:text-red-400";
const BALANCE_TEXT_STYLE: &str = "text-blue-600 dark:text-blue-400";
const EMPTY_MESSAGE_STYLE: &str = "text-gray-400";

/// The state needed for the ledger page.
#[derive(Debug, Clone)]
pub struct LedgerPageState {
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for LedgerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the ledger page.
pub async fn get_ledger_page(State(state): State<LedgerPageState>) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?.to_string();
    let ledger = lock_ledger(&state.ledger)?;

    Ok(ledger_view(&ledger, &today).into_response())
}

fn ledger_view(ledger: &Ledger, today: &str) -> Markup {
    let transactions = &ledger.transactions;
    let totals = Totals::new(transactions);
    let sorted_transactions = sort_by_date_descending(transactions);
    let category_totals = sorted_expense_totals_by_category(transactions);

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-3xl font-bold" { "家計簿アプリ" }

            (summary_cards(&totals))

            section class=(CARD_STYLE)
            {
                h2 class="text-xl font-bold mb-4" { "取引を追加" }
                (add_transaction_form(today))
            }

            section class=(CARD_STYLE)
            {
                div class="flex items-center justify-between mb-4"
                {
                    h2 class="text-xl font-bold" { "取引履歴（" (transactions.len()) "件）" }

                    @if !transactions.is_empty() {
                        button
                            type="button"
                            hx-delete=(endpoints::TRANSACTIONS_API)
                            hx-confirm="すべての取引を削除しますか？"
                            hx-target-error="#alert-container"
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "すべて削除"
                        }
                    }
                }

                (transaction_table(&sorted_transactions, ledger.editing_id.as_ref()))
            }

            section class=(CARD_STYLE)
            {
                h2 class="text-xl font-bold mb-4" { "カテゴリ別集計（支出）" }
                (category_summary(&category_totals, totals.expense))
            }
        }
    };

    base("ホーム", &[yen_input_styles()], &content)
}

fn summary_cards(totals: &Totals) -> Markup {
    let card = |label: &str, amount: i128, style: &str| {
        html! {
            div class={(CARD_STYLE) " flex-1 min-w-[200px]"}
            {
                div class="text-sm text-gray-500 dark:text-gray-400" { (label) }
                div class={"text-2xl font-bold " (style)} { (format_yen(amount)) }
            }
        }
    };

    html! {
        div class="flex flex-wrap gap-4"
        {
            (card("収入", i128::from(totals.income), INCOME_TEXT_STYLE))
            (card("支出", i128::from(totals.expense), EXPENSE_TEXT_STYLE))
            (card("収支", totals.balance, BALANCE_TEXT_STYLE))
        }
    }
}

fn add_transaction_form(today: &str) -> Markup {
    let fields = transaction_form_fields(&TransactionFormDefaults {
        date: today,
        transaction_type: TransactionType::Expense,
        amount: None,
        category: Category::Food,
        memo: "",
    });

    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            class="grid gap-4 md:grid-cols-6 items-end"
        {
            (fields)

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span
                    id="indicator"
                    class="inline htmx-indicator"
                {
                    (loading_spinner())
                }
                " 追加"
            }
        }
    }
}

fn transaction_table(transactions: &[&Transaction], editing_id: Option<&TransactionId>) -> Markup {
    if transactions.is_empty() {
        return html! {
            p class=(EMPTY_MESSAGE_STYLE) { "取引データがありません" }
        };
    }

    html! {
        div class="overflow-x-auto"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "日付" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "種別" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "カテゴリ" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "金額" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "メモ" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-center"} { "操作" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        @if Some(&transaction.id) == editing_id {
                            (edit_row(transaction))
                        } @else {
                            (transaction_row(transaction))
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let id = transaction.id.as_ref();
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_TRANSACTION, id);
    let delete_endpoint = endpoints::format_endpoint(endpoints::TRANSACTION, id);
    let (sign, amount_style, badge_style) = match transaction.transaction_type {
        TransactionType::Income => (
            "+",
            INCOME_TEXT_STYLE,
            "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-300",
        ),
        TransactionType::Expense => (
            "-",
            EXPENSE_TEXT_STYLE,
            "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-300",
        ),
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(id)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE)
            {
                span class={"px-2 py-1 rounded text-xs " (badge_style)}
                {
                    (transaction.transaction_type.label())
                }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.category.as_str()) }
            td class={(TABLE_CELL_STYLE) " text-right font-bold " (amount_style)}
            {
                (sign) (format_yen(i128::from(transaction.amount.get())))
            }
            td class=(TABLE_CELL_STYLE)
            {
                @if transaction.memo.is_empty() { "—" } @else { (transaction.memo) }
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-2 justify-center"
                {
                    button
                        type="button"
                        hx-post=(edit_endpoint)
                        hx-target-error="#alert-container"
                        class=(BUTTON_EDIT_STYLE)
                    {
                        "編集"
                    }

                    button
                        type="button"
                        hx-delete=(delete_endpoint)
                        hx-confirm="本当に削除しますか？"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "削除"
                    }
                }
            }
        }
    }
}

fn edit_row(transaction: &Transaction) -> Markup {
    let update_endpoint = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id.as_ref());
    let cells = transaction_edit_cells(
        &TransactionFormDefaults {
            date: &transaction.date,
            transaction_type: transaction.transaction_type,
            amount: Some(transaction.amount),
            category: transaction.category,
            memo: &transaction.memo,
        },
        TABLE_EDIT_CELL_STYLE,
    );

    html! {
        tr class=(TABLE_EDIT_ROW_STYLE) data-transaction-id=(transaction.id.as_ref()) data-editing="true"
        {
            (cells)
            td class=(TABLE_EDIT_CELL_STYLE)
            {
                div class="flex gap-2 justify-center"
                {
                    button
                        type="button"
                        hx-put=(update_endpoint)
                        hx-include="closest tr"
                        hx-target-error="#alert-container"
                        class=(BUTTON_SAVE_STYLE)
                    {
                        "保存"
                    }

                    button
                        type="button"
                        hx-post=(endpoints::CANCEL_EDIT)
                        hx-target-error="#alert-container"
                        class=(BUTTON_CANCEL_STYLE)
                    {
                        "キャンセル"
                    }
                }
            }
        }
    }
}

fn category_summary(category_totals: &[(Category, u64)], total_expense: u64) -> Markup {
    if category_totals.is_empty() {
        return html! {
            p class=(EMPTY_MESSAGE_STYLE) { "支出データがありません" }
        };
    }

    html! {
        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "カテゴリ" }
                    th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "金額" }
                    th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "割合" }
                }
            }

            tbody
            {
                @for (category, amount) in category_totals {
                    @let share = percentage(*amount, total_expense);

                    tr class=(TABLE_ROW_STYLE) data-category=(category.as_str())
                    {
                        td class=(TABLE_CELL_STYLE) { (category.as_str()) }
                        td class={(TABLE_CELL_STYLE) " text-right font-bold " (EXPENSE_TEXT_STYLE)}
                        {
                            (format_yen(i128::from(*amount)))
                        }
                        td class=(TABLE_CELL_STYLE)
                        {
                            div class="flex items-center gap-2 justify-end"
                            {
                                div class="w-[100px] h-5 bg-gray-100 dark:bg-gray-700 rounded-full overflow-hidden"
                                {
                                    div
                                        class="h-full bg-red-500"
                                        style={"width: " (share) "%"}
                                    {}
                                }
                                span class="min-w-[40px] text-right" data-percentage { (share) "%" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use scraper::{Html, Selector};

    use crate::{
        endpoints,
        ledger::{
            Amount, Category, Ledger, Transaction, TransactionId, TransactionType,
            page::{LedgerPageState, get_ledger_page, ledger_view},
        },
        test_utils::{
            assert_content_type, assert_form_input, assert_form_input_with_value,
            assert_form_submit_button_with_text, assert_hx_endpoint, assert_status_ok,
            assert_valid_html, must_get_form, parse_html_document,
        },
    };

    fn transaction(
        id: &str,
        date: &str,
        transaction_type: TransactionType,
        amount: u64,
        category: Category,
    ) -> Transaction {
        Transaction {
            id: TransactionId::from(id),
            date: date.to_owned(),
            transaction_type,
            amount: Amount::new_unchecked(amount),
            category,
            memo: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn get_state(ledger: Ledger) -> LedgerPageState {
        LedgerPageState {
            ledger: Arc::new(Mutex::new(ledger)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    async fn render(ledger: Ledger) -> Html {
        let response = get_ledger_page(State(get_state(ledger))).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    fn texts(html: &Html, selector: &str) -> Vec<String> {
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector)
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    fn sample_ledger() -> Ledger {
        Ledger::new(vec![
            transaction("a", "2024-01-05", TransactionType::Expense, 800, Category::Food),
            transaction("b", "2024-01-25", TransactionType::Income, 3000, Category::Salary),
            transaction("c", "2024-01-10", TransactionType::Expense, 200, Category::Transport),
        ])
    }

    #[tokio::test]
    async fn empty_ledger_shows_empty_messages() {
        let html = render(Ledger::default()).await;

        let paragraphs = texts(&html, "p");
        assert!(paragraphs.contains(&"取引データがありません".to_owned()));
        assert!(paragraphs.contains(&"支出データがありません".to_owned()));
        assert!(texts(&html, "h2").contains(&"取引履歴（0件）".to_owned()));
    }

    #[test]
    fn add_form_posts_to_transactions_api() {
        let html = Html::parse_document(&ledger_view(&Ledger::default(), "2024-01-01").into_string());
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_eq!(
            form.value().attr("hx-target-error"),
            Some("#alert-container")
        );
        assert_form_input_with_value(&form, "date", "date", "2024-01-01");
        assert_form_input(&form, "amount", "number");
        assert_form_submit_button_with_text(&form, "追加");
    }

    #[tokio::test]
    async fn shows_totals() {
        let html = render(sample_ledger()).await;

        let totals = texts(&html, "div.text-2xl");
        assert_eq!(totals, ["¥3,000", "¥1,000", "¥2,000"]);
    }

    #[tokio::test]
    async fn lists_transactions_newest_first() {
        let html = render(sample_ledger()).await;

        let selector = Selector::parse("tbody tr[data-transaction-id]").unwrap();
        let ids: Vec<&str> = html
            .select(&selector)
            .map(|row| row.value().attr("data-transaction-id").unwrap())
            .collect();

        assert_eq!(ids, ["b", "c", "a"]);
        assert!(texts(&html, "h2").contains(&"取引履歴（3件）".to_owned()));
    }

    #[tokio::test]
    async fn delete_buttons_require_confirmation() {
        let html = render(sample_ledger()).await;

        let selector = Selector::parse("tr[data-transaction-id] button[hx-delete]").unwrap();
        let buttons: Vec<_> = html.select(&selector).collect();

        assert_eq!(buttons.len(), 3);
        for button in buttons {
            assert_eq!(button.value().attr("hx-confirm"), Some("本当に削除しますか？"));
        }
    }

    #[tokio::test]
    async fn editing_row_is_rendered_as_inputs() {
        let mut ledger = sample_ledger();
        ledger.editing_id = Some(TransactionId::from("c"));

        let html = render(ledger).await;

        let selector = Selector::parse("tr[data-editing]").unwrap();
        let rows: Vec<_> = html.select(&selector).collect();
        assert_eq!(rows.len(), 1, "want exactly one edit row");
        let row = rows[0];
        assert_eq!(row.value().attr("data-transaction-id"), Some("c"));

        let amount = Selector::parse("input[name=amount]").unwrap();
        let amount = row.select(&amount).next().expect("No amount input");
        assert_eq!(amount.value().attr("value"), Some("200"));

        let save = Selector::parse("button[hx-put]").unwrap();
        let save = row.select(&save).next().expect("No save button");
        assert_eq!(
            save.value().attr("hx-put"),
            Some(endpoints::format_endpoint(endpoints::TRANSACTION, "c").as_str())
        );
    }

    #[tokio::test]
    async fn category_breakdown_is_sorted_with_percentages() {
        let html = render(sample_ledger()).await;

        let selector = Selector::parse("tr[data-category]").unwrap();
        let categories: Vec<&str> = html
            .select(&selector)
            .map(|row| row.value().attr("data-category").unwrap())
            .collect();

        assert_eq!(categories, ["食費", "交通費"]);
        assert_eq!(texts(&html, "span[data-percentage]"), ["80%", "20%"]);
    }

    #[tokio::test]
    async fn huge_amounts_render_without_poisoning_the_ledger() {
        let state = get_state(Ledger::new(vec![
            transaction("a", "2024-01-01", TransactionType::Expense, Amount::MAX, Category::Rent),
            transaction("b", "2024-01-02", TransactionType::Expense, Amount::MAX, Category::Rent),
            transaction("c", "2024-01-03", TransactionType::Income, Amount::MAX, Category::Salary),
        ]));

        for _ in 0..2 {
            let response = get_ledger_page(State(state.clone())).await.unwrap();
            assert_status_ok(&response);
            let html = parse_html_document(response).await;

            let totals = texts(&html, "div.text-2xl");
            assert_eq!(totals.len(), 3);
            assert!(!totals[0].starts_with('-'), "income was {:?}", totals[0]);
            assert!(!totals[1].starts_with('-'), "expense was {:?}", totals[1]);
            assert!(totals[2].starts_with("-¥"), "balance was {:?}", totals[2]);
            assert_eq!(texts(&html, "span[data-percentage]"), ["100%"]);
        }

        assert!(!state.ledger.is_poisoned());
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let state = LedgerPageState {
            ledger: Arc::new(Mutex::new(Ledger::default())),
            local_timezone: "Not/A_Timezone".to_owned(),
        };

        let result = get_ledger_page(State(state)).await;

        assert!(result.is_err());
    }
}
