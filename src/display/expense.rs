//! Expense display formatting
//!
//! Renders month views and expense lists for the terminal.

use std::fmt::Write;

use crate::config::Settings;
use crate::models::ExpenseRecord;
use crate::services::MonthView;

const ITEM_WIDTH: usize = 24;

/// Format a single expense as a table row
pub fn format_expense_row(expense: &ExpenseRecord, settings: &Settings) -> String {
    format!(
        "{:10} {} {:>12}  {}",
        format_date(expense, &settings.date_format),
        truncate(&expense.item, ITEM_WIDTH),
        expense.amount.format_with_symbol(&settings.currency_symbol),
        expense.id
    )
}

/// Format one month: heading, total, then rows newest first
pub fn format_month_view(view: &MonthView, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", view.label()));
    output.push_str(&format!(
        "Total: {}\n\n",
        view.total.format_with_symbol(&settings.currency_symbol)
    ));

    if view.is_empty() {
        output.push_str("No expenses for this month.\n");
        return output;
    }

    output.push_str(&header());
    for expense in &view.expenses {
        output.push_str(&format_expense_row(expense, settings));
        output.push('\n');
    }

    output
}

/// Format every stored expense in storage order
pub fn format_expense_list(expenses: &[ExpenseRecord], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let list_settings = Settings {
        date_format: "%Y-%m-%d".to_string(),
        ..settings.clone()
    };

    let mut output = header();
    for expense in expenses {
        output.push_str(&format_expense_row(expense, &list_settings));
        output.push('\n');
    }
    output.push_str(&format!("\nTotal: {} expenses\n", expenses.len()));
    output
}

/// Render the expense date, falling back to ISO format on a bad pattern
fn format_date(expense: &ExpenseRecord, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", expense.date.format(pattern)).is_err() {
        return expense.day().format("%Y-%m-%d").to_string();
    }
    out
}

fn header() -> String {
    format!(
        "{:10} {:width$} {:>12}  {}\n{}\n",
        "Date",
        "Item",
        "Amount",
        "ID",
        "-".repeat(64),
        width = ITEM_WIDTH
    )
}

/// Pad or cut `s` to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}
