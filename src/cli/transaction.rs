//! Transaction CLI commands
//!
//! Implements CLI commands for listing, adding and deleting transactions.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use super::category::{find_category, parse_amount};
use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::display::transaction::{format_transaction_line, format_transaction_table};
use crate::error::{CostbookError, CostbookResult};
use crate::models::{Month, NewTransaction, TransactionId};
use crate::table::{sort_transactions, SortOrder, SortState, TransactionColumn};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List the transactions of a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Column to sort by (date, category, note, amount)
        #[arg(short, long, default_value = "date")]
        sort: String,
        /// Sort in descending order
        #[arg(long)]
        desc: bool,
    },

    /// Record a new expense
    Add {
        /// Amount (e.g., "1200" or "12.50")
        amount: String,
        /// Category name or ID, defaults to the first category
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    api: &dyn ExpenseApi,
    settings: &Settings,
    cmd: TransactionCommands,
) -> CostbookResult<()> {
    let currency = settings.currency_code.as_str();

    match cmd {
        TransactionCommands::List { month, sort, desc } => {
            let month = parse_month_arg(month.as_deref())?;
            let column: TransactionColumn = sort.parse().map_err(CostbookError::Validation)?;
            let order = if desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };

            let categories = api.list_categories()?;
            let transactions = api.list_transactions(&month.range())?;
            let rows = sort_transactions(&transactions, &categories, &SortState::new(column, order));

            println!("Transactions for {}", month);
            print!(
                "{}",
                format_transaction_table(&rows, &categories, currency, &settings.date_format)
            );
        }

        TransactionCommands::Add {
            amount,
            category,
            date,
            note,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive(),
            };

            let categories = api.list_categories()?;
            let category = match category {
                Some(query) => find_category(&categories, &query)?,
                None => categories.first().ok_or_else(|| {
                    CostbookError::Validation(
                        "No categories yet. Add one with 'costbook category add <name>'".into(),
                    )
                })?,
            };

            let payload = NewTransaction::new(date, amount, category.id.clone(), note);
            payload
                .validate()
                .map_err(|e| CostbookError::Validation(e.to_string()))?;

            let created = api.create_transaction(&payload)?;
            println!(
                "Created transaction {}: {}",
                created.id,
                format_transaction_line(&created, &categories, currency)
            );
        }

        TransactionCommands::Delete { id, yes } => {
            let id = TransactionId::new(id.trim());
            if !yes {
                println!("About to delete transaction {}", id);
                println!("Use --yes to confirm deletion");
                return Ok(());
            }
            api.delete_transaction(&id)?;
            println!("Deleted transaction {}", id);
        }
    }

    Ok(())
}

/// Parse an optional `YYYY-MM` argument, defaulting to the current month
pub fn parse_month_arg(month: Option<&str>) -> CostbookResult<Month> {
    match month {
        Some(raw) => Month::parse(raw).map_err(|e| CostbookError::Validation(e.to_string())),
        None => Ok(Month::current()),
    }
}

fn parse_date(raw: &str) -> CostbookResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CostbookError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, Transaction};
    use crate::sync::worker::fake::FakeApi;

    fn api() -> FakeApi {
        let api = FakeApi::with_token("good");
        api.state.lock().unwrap().categories = vec![
            Category::new("1", "Food", Money::zero()),
            Category::new("2", "Rent", Money::zero()),
        ];
        api
    }

    #[test]
    fn test_add_defaults_to_first_category() {
        let api = api();
        handle_transaction_command(
            &api,
            &Settings::default(),
            TransactionCommands::Add {
                amount: "980".into(),
                category: None,
                date: Some("2025-03-04".into()),
                note: Some("  ".into()),
            },
        )
        .unwrap();

        let state = api.state.lock().unwrap();
        let created = &state.transactions[0];
        assert_eq!(created.category_id.as_str(), "1");
        assert_eq!(created.amount, Money::from_major(980));
        assert_eq!(created.note, None);
    }

    #[test]
    fn test_add_rejects_bad_date() {
        let err = handle_transaction_command(
            &api(),
            &Settings::default(),
            TransactionCommands::Add {
                amount: "1".into(),
                category: None,
                date: Some("04/03/2025".into()),
                note: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, CostbookError::Validation(_)));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let api = api();
        api.state.lock().unwrap().transactions.push(Transaction::new(
            "t1",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Money::from_major(5),
            "1",
        ));

        let delete = |yes| TransactionCommands::Delete {
            id: "t1".into(),
            yes,
        };
        handle_transaction_command(&api, &Settings::default(), delete(false)).unwrap();
        assert_eq!(api.state.lock().unwrap().transactions.len(), 1);

        handle_transaction_command(&api, &Settings::default(), delete(true)).unwrap();
        assert!(api.state.lock().unwrap().transactions.is_empty());
    }

    #[test]
    fn test_list_rejects_unknown_column() {
        let err = handle_transaction_command(
            &api(),
            &Settings::default(),
            TransactionCommands::List {
                month: Some("2025-01".into()),
                sort: "payee".into(),
                desc: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, CostbookError::Validation(_)));
    }

    #[test]
    fn test_list_unauthorized_without_token() {
        let api = FakeApi::default();
        let err = handle_transaction_command(
            &api,
            &Settings::default(),
            TransactionCommands::List {
                month: None,
                sort: "date".into(),
                desc: true,
            },
        )
        .unwrap_err();
        assert!(err.is_unauthorized());
    }
}
