//! Persisted login session
//!
//! Holds the auth token issued by `POST /auth/login` between runs.

use serde::{Deserialize, Serialize};

use super::paths::CostbookPaths;
use crate::error::CostbookError;

/// The stored auth token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Token sent in the `X-Auth-Token` header
    #[serde(default)]
    pub token: String,
}

impl Session {
    /// Create a session holding the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Whether a token is present
    pub fn is_signed_in(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// The token, if any
    pub fn token(&self) -> Option<&str> {
        if self.is_signed_in() {
            Some(&self.token)
        } else {
            None
        }
    }

    /// Load the session, returning an empty one when none was saved
    pub fn load(paths: &CostbookPaths) -> Result<Self, CostbookError> {
        let path = paths.session_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| CostbookError::Io(format!("Failed to read session file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| CostbookError::Config(format!("Failed to parse session file: {}", e)))
    }

    /// Persist the session
    pub fn save(&self, paths: &CostbookPaths) -> Result<(), CostbookError> {
        paths.ensure_directories()?;
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.session_file(), contents)
            .map_err(|e| CostbookError::Io(format!("Failed to write session file: {}", e)))
    }

    /// Remove the stored session
    pub fn clear(paths: &CostbookPaths) -> Result<(), CostbookError> {
        let path = paths.session_file();
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| CostbookError::Io(format!("Failed to remove session file: {}", e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_session_is_signed_out() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CostbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        let session = Session::load(&paths).unwrap();
        assert!(!session.is_signed_in());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CostbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        Session::new("abc123").save(&paths).unwrap();
        let loaded = Session::load(&paths).unwrap();
        assert_eq!(loaded.token(), Some("abc123"));

        Session::clear(&paths).unwrap();
        assert!(!Session::load(&paths).unwrap().is_signed_in());
    }

    #[test]
    fn test_blank_token_is_signed_out() {
        assert!(!Session::new("   ").is_signed_in());
    }
}
