//! Core data models for Costbook
//!
//! This module contains the data structures exchanged with the expense
//! server (categories, transactions) and the month selection used to
//! filter them.

pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use category::{Category, CategoryValidationError, NewCategory};
pub use ids::{CategoryId, TransactionId};
pub use money::Money;
pub use month::{Month, MonthRange};
pub use transaction::{NewTransaction, Transaction, TransactionValidationError};
