//! Authenticated session token
//!
//! A `Session` is the proof of authentication that ledger operations require.
//! It is created only by `AuthService::authenticate`, passed explicitly
//! through the call chain, and dropped at logout or process exit; nothing is
//! persisted.

use chrono::{DateTime, Utc};

use crate::models::AccountId;

/// An ephemeral authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    account_id: AccountId,
    username: String,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for an authenticated account
    ///
    /// Crate-internal: only the auth service mints sessions.
    pub(crate) fn new(account_id: AccountId, username: impl Into<String>) -> Self {
        Self {
            account_id,
            username: username.into(),
            started_at: Utc::now(),
        }
    }

    /// The authenticated account id
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// The authenticated username, which scopes all ledger operations
    pub fn username(&self) -> &str {
        &self.username
    }

    /// When the session was established
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
