//! Credential repository for the shared users file
//!
//! All registered users live in a single users.json keyed by username. The
//! file is shared by every session, so each mutation is a lock-serialized
//! read-modify-write of the whole collection followed by an atomic replace.
//! A crash or a near-simultaneous registration can therefore never leave a
//! partially written credential file behind.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::UserAccount;

use super::file_io::{read_json, write_json_atomic};

/// On-disk shape of the credential file
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CredentialData {
    users: BTreeMap<String, UserAccount>,
}

/// Repository for user account persistence
pub struct CredentialRepository {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the shared file
    write_lock: Mutex<()>,
}

impl CredentialRepository {
    /// Create a repository backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> SpendlogResult<CredentialData> {
        read_json(&self.path)
    }

    /// Get an account by username (case-sensitive)
    pub fn get(&self, username: &str) -> SpendlogResult<Option<UserAccount>> {
        Ok(self.load()?.users.get(username).cloned())
    }

    /// Check whether a username is taken
    pub fn contains(&self, username: &str) -> SpendlogResult<bool> {
        Ok(self.load()?.users.contains_key(username))
    }

    /// Number of registered users
    pub fn count(&self) -> SpendlogResult<usize> {
        Ok(self.load()?.users.len())
    }

    /// Insert a new account, failing if the username already exists
    pub fn insert(&self, account: UserAccount) -> SpendlogResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| SpendlogError::Storage(format!("Credential lock poisoned: {}", e)))?;

        let mut data = self.load()?;
        if data.users.contains_key(&account.username) {
            return Err(SpendlogError::duplicate_username(&account.username));
        }
        data.users.insert(account.username.clone(), account);
        write_json_atomic(&self.path, &data)
    }

    /// Apply a mutation to an existing account and persist the collection
    pub fn update<F>(&self, username: &str, mutate: F) -> SpendlogResult<UserAccount>
    where
        F: FnOnce(&mut UserAccount),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| SpendlogError::Storage(format!("Credential lock poisoned: {}", e)))?;

        let mut data = self.load()?;
        let account = data
            .users
            .get_mut(username)
            .ok_or_else(|| SpendlogError::user_not_found(username))?;
        mutate(account);
        let updated = account.clone();
        write_json_atomic(&self.path, &data)?;
        Ok(updated)
    }
}
