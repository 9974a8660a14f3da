//! Path management for spendlog
//!
//! Provides XDG-compliant path resolution for the shared credential file and
//! the per-user ledger files.
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDLOG_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/spendlog` or `~/.config/spendlog`
//! 3. Windows: `%APPDATA%\spendlog`

use std::path::PathBuf;

use crate::error::SpendlogError;

/// Manages all paths used by spendlog
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Base directory for all spendlog data
    base_dir: PathBuf,
}

impl AppPaths {
    /// Create a new AppPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SpendlogError> {
        let base_dir = if let Ok(custom) = std::env::var("SPENDLOG_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create AppPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/spendlog/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the directory holding per-user ledger files
    pub fn ledger_dir(&self) -> PathBuf {
        self.base_dir.join("ledgers")
    }

    /// Get the path to the shared credential file
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.json")
    }

    /// Get the path to a user's ledger file
    ///
    /// Usernames are validated at registration to `[A-Za-z0-9_-]`, so the
    /// file name cannot escape the ledger directory.
    pub fn ledger_file(&self, username: &str) -> PathBuf {
        self.ledger_dir().join(format!("ledger_{}.json", username))
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), SpendlogError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendlogError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.ledger_dir())
            .map_err(|e| SpendlogError::Io(format!("Failed to create ledger directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SpendlogError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .map_err(|_| {
                    SpendlogError::Config("Could not determine home directory".into())
                })
        })?;
    Ok(config_base.join("spendlog"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SpendlogError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SpendlogError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("spendlog"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.ledger_dir(), temp_dir.path().join("ledgers"));
        assert_eq!(paths.users_file(), temp_dir.path().join("users.json"));
    }

    #[test]
    fn test_ledger_file_per_username() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.ledger_file("bob"),
            temp_dir.path().join("ledgers").join("ledger_bob.json")
        );
        assert_ne!(paths.ledger_file("alice"), paths.ledger_file("bob"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.ledger_dir().exists());
    }
}
