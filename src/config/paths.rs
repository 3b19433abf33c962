//! Path management for Costbook
//!
//! Provides XDG-compliant path resolution for configuration, the session
//! token and the log file.
//!
//! ## Path Resolution Order
//!
//! 1. `COSTBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/costbook` or `~/.config/costbook`
//! 3. Windows: `%APPDATA%\costbook`

use std::path::PathBuf;

use crate::error::CostbookError;

/// Manages all paths used by Costbook
#[derive(Debug, Clone)]
pub struct CostbookPaths {
    /// Base directory for all Costbook files
    base_dir: PathBuf,
}

impl CostbookPaths {
    /// Create a new CostbookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CostbookError> {
        let base_dir = if let Ok(custom) = std::env::var("COSTBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CostbookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/costbook/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the stored session token
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to the log file
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("costbook.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), CostbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CostbookError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CostbookError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("costbook"));
    }
    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| CostbookError::Config("Could not determine home directory".into()))?;
    Ok(dirs.home_dir().join(".config").join("costbook"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CostbookError> {
    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| CostbookError::Config("Could not determine APPDATA directory".into()))?;
    Ok(dirs.config_dir().join("costbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CostbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.session_file(), temp_dir.path().join("session.json"));
        assert_eq!(paths.log_file(), temp_dir.path().join("costbook.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("costbook");
        let paths = CostbookPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();

        assert!(nested.exists());
    }
}
