//! Authentication service
//!
//! Registration, login verification, password change, and profile updates
//! against the shared credential store. Passwords are stored as SHA-256 hex
//! digests; plaintext never touches disk.

use sha2::{Digest, Sha256};

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::UserAccount;
use crate::session::Session;
use crate::storage::Storage;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum username length
pub const MIN_USERNAME_LEN: usize = 3;

/// Input for registering a new user
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// Profile fields that can be updated after registration
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub currency: Option<String>,
    pub date_format: Option<String>,
    pub theme: Option<String>,
}

/// Service for user authentication and profile management
pub struct AuthService<'a> {
    storage: &'a Storage,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user
    ///
    /// Usernames are case-sensitive keys, at least three characters from
    /// `[A-Za-z0-9_-]` (they name the per-user ledger file on disk).
    pub fn register(&self, input: RegisterInput) -> SpendlogResult<UserAccount> {
        validate_username(&input.username)?;
        validate_password(&input.password)?;

        let mut account = UserAccount::new(&input.username, hash_password(&input.password));
        if let Some(email) = input.email {
            account.email = email;
        }
        if let Some(full_name) = input.full_name {
            account.full_name = full_name;
        }

        // The repository rejects duplicates under its write lock, so two
        // near-simultaneous registrations cannot both win.
        self.storage.credentials.insert(account.clone())?;
        Ok(account)
    }

    /// Authenticate a user and mint a session
    pub fn authenticate(&self, username: &str, password: &str) -> SpendlogResult<Session> {
        let account = self
            .storage
            .credentials
            .get(username)?
            .ok_or(SpendlogError::InvalidCredentials)?;

        if account.password_hash != hash_password(password) {
            return Err(SpendlogError::InvalidCredentials);
        }

        let account = self
            .storage
            .credentials
            .update(username, |a| a.record_login())?;

        Ok(Session::new(account.id, &account.username))
    }

    /// Change the session user's password
    pub fn change_password(
        &self,
        session: &Session,
        old_password: &str,
        new_password: &str,
    ) -> SpendlogResult<()> {
        let account = self
            .storage
            .credentials
            .get(session.username())?
            .ok_or(SpendlogError::InvalidCredentials)?;

        if account.password_hash != hash_password(old_password) {
            return Err(SpendlogError::InvalidCredentials);
        }

        validate_password(new_password)?;

        let new_hash = hash_password(new_password);
        self.storage
            .credentials
            .update(session.username(), |a| a.password_hash = new_hash)?;
        Ok(())
    }

    /// Update the session user's profile fields and preferences
    pub fn update_profile(
        &self,
        session: &Session,
        update: ProfileUpdate,
    ) -> SpendlogResult<UserAccount> {
        self.storage.credentials.update(session.username(), |a| {
            if let Some(email) = update.email {
                a.email = email;
            }
            if let Some(full_name) = update.full_name {
                a.full_name = full_name;
            }
            if let Some(currency) = update.currency {
                a.preferences.currency = currency;
            }
            if let Some(date_format) = update.date_format {
                a.preferences.date_format = date_format;
            }
            if let Some(theme) = update.theme {
                a.preferences.theme = theme;
            }
        })
    }

    /// Get the session user's account record
    pub fn current_user(&self, session: &Session) -> SpendlogResult<UserAccount> {
        self.storage
            .credentials
            .get(session.username())?
            .ok_or_else(|| SpendlogError::user_not_found(session.username()))
    }
}

/// SHA-256 hex digest of a password
fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Minimum lengths are counted in characters, not bytes, so multi-byte
/// passwords are measured the way the user typed them.
fn validate_password(password: &str) -> SpendlogResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SpendlogError::WeakPassword {
            minimum: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

fn validate_username(username: &str) -> SpendlogResult<()> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(SpendlogError::Validation(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_LEN
        )));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(SpendlogError::Validation(
            "Username may only contain letters, digits, '_' and '-'".into(),
        ));
    }

    Ok(())
}
