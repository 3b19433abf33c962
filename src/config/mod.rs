//! Configuration module for Costbook
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - The stored login session
//! - Log file setup

pub mod logging;
pub mod paths;
pub mod session;
pub mod settings;

pub use paths::CostbookPaths;
pub use session::Session;
pub use settings::Settings;
