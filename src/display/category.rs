//! Category display formatting
//!
//! Formats categories with their budget progress for terminal output.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::report::{format_bar, format_percentage, truncate};
use crate::models::Category;
use crate::reports::BudgetProgress;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Budget")]
    budget: String,
}

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Progress")]
    bar: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format the category list
pub fn format_category_list(categories: &[Category], currency: &str) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nAdd one with 'costbook category add <name>'.\n".to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        name: truncate(&c.name, 30),
        color: c.color.clone(),
        budget: if c.has_budget() {
            c.budget.format_currency(currency)
        } else {
            "-".to_string()
        },
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));
    format!("{}\n", table)
}

/// Format budget progress rows
pub fn format_budget_progress(rows: &[BudgetProgress], currency: &str) -> String {
    if rows.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows = rows.iter().map(|row| ProgressRow {
        name: truncate(&row.category_name, 24),
        spent: row.spent.format_currency(currency),
        budget: if row.has_budget() {
            row.budget.format_currency(currency)
        } else {
            "-".to_string()
        },
        bar: if row.has_budget() {
            format!(
                "{} {}",
                format_bar(row.fill(), 1.0, 16),
                format_percentage(row.ratio() * 100.0)
            )
        } else {
            String::new()
        },
        status: if row.is_over_budget() {
            format!("over by {}", row.overage().format_currency(currency))
        } else if row.has_budget() {
            format!("{} left", row.remaining().format_currency(currency))
        } else {
            String::new()
        },
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()));
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_empty_list() {
        assert!(format_category_list(&[], "JPY").starts_with("No categories found."));
    }

    #[test]
    fn test_category_list() {
        let categories = vec![
            Category::new("1", "Food", Money::from_major(30000)),
            Category::new("2", "Misc", Money::zero()),
        ];
        let output = format_category_list(&categories, "JPY");
        assert!(output.contains("Food"));
        assert!(output.contains("¥30,000"));
        assert!(output.contains("#1d213e"));
    }

    #[test]
    fn test_budget_progress_shows_overage() {
        let food = Category::new("1", "Food", Money::from_major(100));
        let rows = vec![BudgetProgress::new(&food, Money::from_major(130))];
        let output = format_budget_progress(&rows, "USD");
        assert!(output.contains("over by $30.00"));
        assert!(output.contains("130%"));
    }
}
