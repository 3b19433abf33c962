//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and progress bars.

pub mod category;
pub mod report;
pub mod transaction;

pub use category::{format_budget_progress, format_category_list};
pub use transaction::{format_transaction_line, format_transaction_table};
