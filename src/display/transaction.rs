//! Transaction display formatting
//!
//! Renders a month's transactions as a table for the CLI.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::{Category, Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format transactions (already in display order) as a table
pub fn format_transaction_table(
    transactions: &[&Transaction],
    categories: &[Category],
    currency: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.date().format(date_format).to_string(),
        category: truncate(txn.category_name(categories), 24),
        note: truncate(txn.note_text(), 32),
        amount: txn.amount.format_currency(currency),
    });

    let total: Money = transactions.iter().map(|t| t.amount).sum();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    format!(
        "{}\n{} transaction(s), total {}\n",
        table,
        transactions.len(),
        total.format_currency(currency)
    )
}

/// One-line description used in confirmations
pub fn format_transaction_line(txn: &Transaction, categories: &[Category], currency: &str) -> String {
    let note = match txn.note.as_deref() {
        Some(note) => format!(" \"{}\"", note),
        None => String::new(),
    };
    format!(
        "{} {} {}{}",
        txn.date().format("%Y-%m-%d"),
        txn.category_name(categories),
        txn.amount.format_currency(currency),
        note
    )
}
