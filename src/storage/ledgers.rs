//! Ledger repository with one file per owner
//!
//! Each user's transactions live in their own ledger_<username>.json, so one
//! user's read-modify-write cycle never contends with another's. Within one
//! owner, a per-owner mutex serializes writes so two sessions of the same
//! user cannot lose updates to each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::AppPaths;
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk shape of one owner's ledger file
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct LedgerData {
    transactions: Vec<Transaction>,
}

/// Repository for per-user transaction persistence
pub struct LedgerRepository {
    paths: AppPaths,
    /// One write lock per owner, created on first use
    owner_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LedgerRepository {
    /// Create a new ledger repository
    pub fn new(paths: AppPaths) -> Self {
        Self {
            paths,
            owner_locks: Mutex::new(HashMap::new()),
        }
    }

    fn owner_lock(&self, owner: &str) -> SpendlogResult<Arc<Mutex<()>>> {
        let mut locks = self
            .owner_locks
            .lock()
            .map_err(|e| SpendlogError::Storage(format!("Ledger lock poisoned: {}", e)))?;
        Ok(locks.entry(owner.to_string()).or_default().clone())
    }

    fn load(&self, owner: &str) -> SpendlogResult<LedgerData> {
        read_json(self.paths.ledger_file(owner))
    }

    /// Append a transaction to the owner's ledger
    pub fn append(&self, owner: &str, txn: Transaction) -> SpendlogResult<()> {
        let lock = self.owner_lock(owner)?;
        let _guard = lock
            .lock()
            .map_err(|e| SpendlogError::Storage(format!("Ledger lock poisoned: {}", e)))?;

        let mut data = self.load(owner)?;
        data.transactions.push(txn);
        write_json_atomic(self.paths.ledger_file(owner), &data)
    }

    /// Get all of the owner's transactions, newest date first
    pub fn get_all(&self, owner: &str) -> SpendlogResult<Vec<Transaction>> {
        let mut transactions = self.load(owner)?.transactions;
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    /// Get one transaction by id
    pub fn get(&self, owner: &str, id: TransactionId) -> SpendlogResult<Option<Transaction>> {
        Ok(self
            .load(owner)?
            .transactions
            .into_iter()
            .find(|t| t.id == id))
    }

    /// Delete a transaction from the owner's ledger
    ///
    /// Returns the removed transaction, or None if the id was absent.
    pub fn delete(&self, owner: &str, id: TransactionId) -> SpendlogResult<Option<Transaction>> {
        let lock = self.owner_lock(owner)?;
        let _guard = lock
            .lock()
            .map_err(|e| SpendlogError::Storage(format!("Ledger lock poisoned: {}", e)))?;

        let mut data = self.load(owner)?;
        let position = data.transactions.iter().position(|t| t.id == id);

        match position {
            Some(index) => {
                let removed = data.transactions.remove(index);
                write_json_atomic(self.paths.ledger_file(owner), &data)?;
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }

    /// Count the owner's transactions
    pub fn count(&self, owner: &str) -> SpendlogResult<usize> {
        Ok(self.load(owner)?.transactions.len())
    }
}
