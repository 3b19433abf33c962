//! Reports module for Costbook
//!
//! Provides the monthly spending summary and budget progress shared by the
//! CLI and the TUI.

pub mod summary;

pub use summary::{BudgetProgress, CategorySpend, MonthSummary};
