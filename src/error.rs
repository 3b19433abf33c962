//! Custom error types for Costbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Costbook operations
#[derive(Error, Debug)]
pub enum CostbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Missing, expired or rejected auth token
    #[error("Not signed in: {0}")]
    Unauthorized(String),

    /// The server answered with a non-success status
    #[error("{action} (HTTP {status})")]
    Request { action: &'static str, status: u16 },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl CostbookError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error should send the user back to the login prompt
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Short message suitable for a status line
    pub fn user_message(&self) -> String {
        match self {
            Self::Request { action, .. } => (*action).to_string(),
            Self::Unauthorized(reason) => format!("{}: please sign in again", reason),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for CostbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CostbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Costbook operations
pub type CostbookResult<T> = Result<T, CostbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CostbookError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = CostbookError::category_not_found("Groceries");
        assert_eq!(err.to_string(), "Category not found: Groceries");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_request_error_message() {
        let err = CostbookError::Request {
            action: "Failed to fetch transactions",
            status: 500,
        };
        assert_eq!(err.to_string(), "Failed to fetch transactions (HTTP 500)");
        assert_eq!(err.user_message(), "Failed to fetch transactions");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized_is_distinct() {
        let err = CostbookError::Unauthorized("auth token expired".into());
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "auth token expired: please sign in again");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CostbookError = io_err.into();
        assert!(matches!(err, CostbookError::Io(_)));
    }
}
