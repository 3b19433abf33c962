//! Monthly spending summary
//!
//! Aggregates the transactions of one month per category, picks the top
//! spending category and computes budget progress for each category.

use crate::display::report::{format_bar, format_percentage, truncate};
use crate::models::{Category, CategoryId, Money, Month, Transaction};

/// Spending for one category in the month
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    /// Category ID (may reference a category that no longer exists)
    pub category_id: CategoryId,
    /// Resolved display name
    pub category_name: String,
    /// Total spent
    pub spent: Money,
    /// Number of transactions
    pub transaction_count: usize,
}

/// Budget progress for one category
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub category_id: CategoryId,
    pub category_name: String,
    pub color: String,
    pub spent: Money,
    pub budget: Money,
}

impl BudgetProgress {
    /// Build a progress row for a category
    pub fn new(category: &Category, spent: Money) -> Self {
        Self {
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            color: category.color.clone(),
            spent,
            budget: category.budget,
        }
    }

    /// Whether the category has a positive budget
    pub fn has_budget(&self) -> bool {
        self.budget.is_positive()
    }

    /// spent / budget, or 0 without a budget
    pub fn ratio(&self) -> f64 {
        self.spent.ratio_of(self.budget)
    }

    /// Over budget iff spending exceeds a positive budget
    pub fn is_over_budget(&self) -> bool {
        self.has_budget() && self.spent > self.budget
    }

    /// Amount spent beyond the budget, zero when within budget
    pub fn overage(&self) -> Money {
        if self.is_over_budget() {
            self.spent - self.budget
        } else {
            Money::zero()
        }
    }

    /// Budget left, zero once exhausted
    pub fn remaining(&self) -> Money {
        if self.has_budget() && self.spent < self.budget {
            self.budget - self.spent
        } else {
            Money::zero()
        }
    }

    /// Ratio clamped to `[0, 1]` for progress bars
    pub fn fill(&self) -> f64 {
        self.ratio().clamp(0.0, 1.0)
    }
}

/// Aggregated view of a month
#[derive(Debug, Clone)]
pub struct MonthSummary {
    /// Month summarized
    pub month: Month,
    /// Total spent in the month
    pub total: Money,
    /// Spending per category, in first-seen order
    pub by_category: Vec<CategorySpend>,
    /// Category with the highest spending (first seen wins ties)
    pub top_category: Option<CategorySpend>,
    /// Number of transactions in the month
    pub transaction_count: usize,
    /// Budget progress, one row per category in category order
    pub budgets: Vec<BudgetProgress>,
}

impl MonthSummary {
    /// Summarize the transactions falling in `month`
    pub fn generate(month: Month, transactions: &[Transaction], categories: &[Category]) -> Self {
        let mut by_category: Vec<CategorySpend> = Vec::new();
        let mut total = Money::zero();
        let mut transaction_count = 0;

        for txn in transactions.iter().filter(|t| month.contains(t.date())) {
            total += txn.amount;
            transaction_count += 1;

            match by_category
                .iter_mut()
                .find(|s| s.category_id == txn.category_id)
            {
                Some(entry) => {
                    entry.spent += txn.amount;
                    entry.transaction_count += 1;
                }
                None => by_category.push(CategorySpend {
                    category_id: txn.category_id.clone(),
                    category_name: txn.category_name(categories).to_string(),
                    spent: txn.amount,
                    transaction_count: 1,
                }),
            }
        }

        let mut top_category: Option<&CategorySpend> = None;
        for entry in &by_category {
            if top_category.map_or(true, |top| entry.spent > top.spent) {
                top_category = Some(entry);
            }
        }
        let top_category = top_category.cloned();

        let budgets = categories
            .iter()
            .map(|c| {
                let spent = by_category
                    .iter()
                    .find(|s| s.category_id == c.id)
                    .map(|s| s.spent)
                    .unwrap_or_default();
                BudgetProgress::new(c, spent)
            })
            .collect();

        Self {
            month,
            total,
            by_category,
            top_category,
            transaction_count,
            budgets,
        }
    }

    /// Amount spent in a category, zero when it had no transactions
    pub fn spent_in(&self, category_id: &CategoryId) -> Money {
        self.by_category
            .iter()
            .find(|s| &s.category_id == category_id)
            .map(|s| s.spent)
            .unwrap_or_default()
    }

    /// Name of the top category, or "-" when nothing was spent
    pub fn top_category_name(&self) -> &str {
        self.top_category
            .as_ref()
            .map(|t| t.category_name.as_str())
            .unwrap_or("-")
    }

    /// Categories whose spending exceeds their budget
    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetProgress> {
        self.budgets.iter().filter(|b| b.is_over_budget())
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Summary for {} ({} to {})\n",
            self.month,
            self.month.first_day(),
            self.month.last_day()
        ));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "Total spent:   {}\n",
            self.total.format_currency(currency)
        ));
        output.push_str(&format!("Top category:  {}\n", self.top_category_name()));
        output.push_str(&format!("Transactions:  {}\n\n", self.transaction_count));

        if !self.by_category.is_empty() {
            output.push_str(&format!(
                "{:<28} {:>14} {:>6} {:>7}\n",
                "Category", "Spent", "Count", "%"
            ));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for entry in &self.by_category {
                let pct = entry.spent.ratio_of(self.total) * 100.0;
                output.push_str(&format!(
                    "{:<28} {:>14} {:>6} {:>7}\n",
                    truncate(&entry.category_name, 28),
                    entry.spent.format_currency(currency),
                    entry.transaction_count,
                    format_percentage(pct)
                ));
            }
            output.push('\n');
        }

        let budgeted: Vec<_> = self.budgets.iter().filter(|b| b.has_budget()).collect();
        if !budgeted.is_empty() {
            output.push_str("Budgets\n");
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for row in budgeted {
                output.push_str(&format!(
                    "{:<20} {} {:>6}  {} / {}",
                    truncate(&row.category_name, 20),
                    format_bar(row.fill(), 1.0, 20),
                    format_percentage(row.ratio() * 100.0),
                    row.spent.format_currency(currency),
                    row.budget.format_currency(currency)
                ));
                if row.is_over_budget() {
                    output.push_str(&format!(
                        "  OVER by {}",
                        row.overage().format_currency(currency)
                    ));
                }
                output.push('\n');
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::UNKNOWN_CATEGORY;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixtures() -> (Vec<Category>, Vec<Transaction>) {
        let categories = vec![
            Category::new("food", "Food", Money::from_major(300)),
            Category::new("rent", "Rent", Money::from_major(1000)),
            Category::new("fun", "Fun", Money::zero()),
        ];
        let transactions = vec![
            Transaction::new("1", date(2024, 3, 2), Money::from_major(120), "food"),
            Transaction::new("2", date(2024, 3, 5), Money::from_major(1000), "rent"),
            Transaction::new("3", date(2024, 3, 9), Money::from_cents(20050), "food"),
            Transaction::new("4", date(2024, 3, 31), Money::from_major(40), "gone"),
            Transaction::new("5", date(2024, 4, 1), Money::from_major(999), "fun"),
        ];
        (categories, transactions)
    }

    #[test]
    fn test_total_equals_sum_of_categories() {
        let (categories, transactions) = fixtures();
        let summary = MonthSummary::generate(Month::new(2024, 3).unwrap(), &transactions, &categories);

        let per_category: Money = summary.by_category.iter().map(|s| s.spent).sum();
        assert_eq!(summary.total, per_category);
        assert_eq!(summary.total, Money::from_cents(136050));
        assert_eq!(summary.transaction_count, 4);
    }

    #[test]
    fn test_first_seen_order_and_dangling_category() {
        let (categories, transactions) = fixtures();
        let summary = MonthSummary::generate(Month::new(2024, 3).unwrap(), &transactions, &categories);

        let names: Vec<_> = summary
            .by_category
            .iter()
            .map(|s| s.category_name.as_str())
            .collect();
        assert_eq!(names, vec!["Food", "Rent", UNKNOWN_CATEGORY]);
        assert_eq!(summary.spent_in(&CategoryId::new("food")), Money::from_cents(32050));
        assert_eq!(summary.spent_in(&CategoryId::new("fun")), Money::zero());
    }

    #[test]
    fn test_top_category_ties_keep_first_seen() {
        let categories = vec![
            Category::new("a", "A", Money::zero()),
            Category::new("b", "B", Money::zero()),
        ];
        let transactions = vec![
            Transaction::new("1", date(2024, 1, 1), Money::from_major(50), "a"),
            Transaction::new("2", date(2024, 1, 2), Money::from_major(50), "b"),
        ];
        let summary = MonthSummary::generate(Month::new(2024, 1).unwrap(), &transactions, &categories);
        assert_eq!(summary.top_category_name(), "A");

        let empty = MonthSummary::generate(Month::new(2024, 2).unwrap(), &transactions, &categories);
        assert!(empty.top_category.is_none());
        assert_eq!(empty.total, Money::zero());
    }

    #[test]
    fn test_over_budget_iff_spent_exceeds_budget() {
        let (categories, transactions) = fixtures();
        let summary = MonthSummary::generate(Month::new(2024, 3).unwrap(), &transactions, &categories);

        let food = &summary.budgets[0];
        assert!(food.is_over_budget());
        assert_eq!(food.overage(), Money::from_cents(2050));
        assert_eq!(food.fill(), 1.0);

        let rent = &summary.budgets[1];
        assert!(!rent.is_over_budget());
        assert_eq!(rent.overage(), Money::zero());
        assert!((rent.ratio() - 1.0).abs() < f64::EPSILON);

        let fun = &summary.budgets[2];
        assert!(!fun.is_over_budget());
        assert_eq!(fun.ratio(), 0.0);

        assert_eq!(summary.over_budget().count(), 1);
    }

    #[test]
    fn test_format_terminal() {
        let (categories, transactions) = fixtures();
        let summary = MonthSummary::generate(Month::new(2024, 3).unwrap(), &transactions, &categories);
        let text = summary.format_terminal("USD");

        assert!(text.contains("Summary for 2024-03"));
        assert!(text.contains("$1,360.50"));
        assert!(text.contains("Top category:  Rent"));
        assert!(text.contains("OVER by $20.50"));
    }
}
