//! User settings for Costbook
//!
//! Manages user preferences: which server to talk to, display currency and
//! date format, and the request timeout.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::paths::CostbookPaths;
use crate::error::CostbookError;

/// Environment variable that overrides the configured API base URL
pub const API_URL_ENV: &str = "COSTBOOK_API_URL";

/// User settings for Costbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the expense API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// ISO 4217 currency code used for display
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_currency_code() -> String {
    "JPY".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            currency_code: default_currency_code(),
            date_format: default_date_format(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CostbookPaths) -> Result<Self, CostbookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CostbookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CostbookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CostbookPaths) -> Result<(), CostbookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CostbookError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            CostbookError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// The API base URL after applying the environment override
    pub fn effective_api_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.api_base_url.clone())
    }
}
