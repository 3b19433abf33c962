//! Data shown by the TUI
//!
//! The dashboard holds what was last loaded from the server for the
//! selected month. Aggregates are always recomputed from these inputs.

use crate::models::{Category, CategoryId, Month, Transaction, TransactionId};
use crate::reports::MonthSummary;
use crate::table::{sort_transactions, SortOrder, SortState, TransactionColumn};

/// Loaded data plus request flags
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Month being viewed
    pub month: Month,
    /// Categories of the signed-in user
    pub categories: Vec<Category>,
    /// Transactions of `month`
    pub transactions: Vec<Transaction>,
    /// Register sort column and direction
    pub sort: SortState<TransactionColumn>,
    /// Whether the server accepted our token
    pub signed_in: bool,
    /// A mutation is in flight; mutating keys are ignored meanwhile
    pub busy: bool,
    /// Message of the last failed action
    pub error: Option<String>,
}

impl Dashboard {
    pub fn new(month: Month) -> Self {
        Self {
            month,
            categories: Vec::new(),
            transactions: Vec::new(),
            sort: SortState::new(TransactionColumn::Date, SortOrder::Descending),
            signed_in: false,
            busy: false,
            error: None,
        }
    }

    /// Totals, top category and budget progress for the month
    pub fn summary(&self) -> MonthSummary {
        MonthSummary::generate(self.month, &self.transactions, &self.categories)
    }

    /// Transactions in register order
    pub fn sorted_transactions(&self) -> Vec<&Transaction> {
        sort_transactions(&self.transactions, &self.categories, &self.sort)
    }

    /// Replace the transaction list; rows outside the month are dropped
    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        let month = self.month;
        self.transactions = transactions
            .into_iter()
            .filter(|t| month.contains(t.date()))
            .collect();
    }

    /// Insert or replace a category returned by the server
    pub fn upsert_category(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    pub fn remove_transaction(&mut self, id: &TransactionId) {
        self.transactions.retain(|t| &t.id != id);
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Switch months; the old month's transactions no longer apply
    pub fn set_month(&mut self, month: Month) {
        if month != self.month {
            self.month = month;
            self.transactions.clear();
        }
    }

    /// Forget everything loaded for the previous user
    pub fn sign_out(&mut self) {
        self.categories.clear();
        self.transactions.clear();
        self.signed_in = false;
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_register_defaults_to_newest_first() {
        let mut dashboard = Dashboard::new(Month::new(2024, 3).unwrap());
        dashboard.set_transactions(vec![
            Transaction::new("a", date(3, 1), Money::from_major(1), "c"),
            Transaction::new("b", date(3, 20), Money::from_major(1), "c"),
        ]);
        let ids: Vec<_> = dashboard
            .sorted_transactions()
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_set_transactions_drops_other_months() {
        let mut dashboard = Dashboard::new(Month::new(2024, 3).unwrap());
        dashboard.set_transactions(vec![
            Transaction::new("a", date(3, 31), Money::from_major(1), "c"),
            Transaction::new("b", date(4, 1), Money::from_major(1), "c"),
        ]);
        assert_eq!(dashboard.transactions.len(), 1);
    }

    #[test]
    fn test_summary_follows_budget_updates() {
        let mut dashboard = Dashboard::new(Month::new(2024, 3).unwrap());
        dashboard.categories = vec![Category::new("c", "Food", Money::from_major(10))];
        dashboard.set_transactions(vec![Transaction::new(
            "a",
            date(3, 2),
            Money::from_major(15),
            "c",
        )]);
        assert!(dashboard.summary().budgets[0].is_over_budget());

        dashboard.upsert_category(Category::new("c", "Food", Money::from_major(20)));
        assert_eq!(dashboard.categories.len(), 1);
        assert!(!dashboard.summary().budgets[0].is_over_budget());
    }

    #[test]
    fn test_sign_out_clears_data() {
        let mut dashboard = Dashboard::new(Month::new(2024, 3).unwrap());
        dashboard.categories = vec![Category::new("c", "Food", Money::zero())];
        dashboard.signed_in = true;
        dashboard.busy = true;
        dashboard.sign_out();
        assert!(dashboard.categories.is_empty());
        assert!(!dashboard.signed_in);
        assert!(!dashboard.busy);
    }
}
