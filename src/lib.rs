//! Costbook - terminal client for a personal expense tracker
//!
//! This library talks to an expense-tracking HTTP service: it signs the user
//! in, records expenses by category, manages monthly budgets and aggregates
//! a month's spending for display in the CLI and the TUI.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings, the stored session and log setup
//! - `error`: Custom error types
//! - `models`: Money, months, categories and transactions
//! - `api`: The HTTP client and the [`api::ExpenseApi`] trait
//! - `reports`: Monthly aggregation (totals, top category, budget progress)
//! - `table`: Column sorting for the transaction register
//! - `sync`: Background request worker and stale-response guard
//! - `display`: Terminal tables for CLI output
//! - `cli`: Command handlers
//! - `tui`: The interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use costbook::config::{CostbookPaths, Settings};
//! use costbook::models::Month;
//!
//! let paths = CostbookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let march = Month::parse("2024-03")?;
//! println!("{:?}", march.range().query_params());
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod sync;
pub mod table;
pub mod tui;

pub use error::{CostbookError, CostbookResult};
