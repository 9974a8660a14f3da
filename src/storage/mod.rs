//! Storage layer for spendlog
//!
//! JSON file storage with atomic writes: one shared credential file plus
//! one ledger file per user.

pub mod credentials;
pub mod file_io;
pub mod ledgers;

pub use credentials::CredentialRepository;
pub use file_io::{read_json, write_json_atomic};
pub use ledgers::LedgerRepository;

use crate::config::AppPaths;
use crate::error::SpendlogError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: AppPaths,
    pub credentials: CredentialRepository,
    pub ledgers: LedgerRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: AppPaths) -> Result<Self, SpendlogError> {
        paths.ensure_directories()?;

        Ok(Self {
            credentials: CredentialRepository::new(paths.users_file()),
            ledgers: LedgerRepository::new(paths.clone()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }
}
