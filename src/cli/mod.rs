//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the expense API.

pub mod auth;
pub mod category;
pub mod summary;
pub mod transaction;

pub use auth::{handle_logout, handle_sign_in, handle_status};
pub use category::{handle_category_command, CategoryCommands};
pub use summary::{format_range, handle_budgets, handle_summary};
pub use transaction::{handle_transaction_command, parse_month_arg, TransactionCommands};
