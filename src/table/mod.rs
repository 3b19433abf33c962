//! Table helpers shared by the CLI and the TUI

pub mod sort;

pub use sort::{sort_transactions, SortOrder, SortState, SortValue, TransactionColumn};
