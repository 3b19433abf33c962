//! Log setup
//!
//! Logs go to `costbook.log` in the config directory because the TUI owns
//! the terminal. The level is read from `COSTBOOK_LOG` (default `info`).

use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

use super::paths::CostbookPaths;
use crate::error::CostbookError;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "COSTBOOK_LOG";

/// Install the global logger, appending to the log file
pub fn init(paths: &CostbookPaths) -> Result<(), CostbookError> {
    paths.ensure_directories()?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .map_err(|e| CostbookError::Io(format!("Failed to open log file: {}", e)))?;

    Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| CostbookError::Config(format!("Failed to initialize logging: {}", e)))
}
