//! Terminal User Interface module
//!
//! This module provides the interactive dashboard using ratatui. It has
//! views for the month overview, the transaction register and budgets,
//! and dialogs for signing in and data entry. API calls run on a worker
//! thread so the interface never blocks on the network.

pub mod app;
pub mod dashboard;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use dashboard::Dashboard;
pub use terminal::run_tui;
