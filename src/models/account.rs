//! User account model
//!
//! A credential record plus optional profile fields and display preferences.
//! Accounts are keyed by username (case-sensitive) in the shared credential
//! file and are never deleted by the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::AccountId;

/// Per-user display preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Currency code, e.g. "USD"
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Date format (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// UI theme name
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_theme() -> String {
    "light".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            date_format: default_date_format(),
            theme: default_theme(),
        }
    }
}

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique identifier
    pub id: AccountId,

    /// Username, the case-sensitive key into the credential store
    pub username: String,

    /// SHA-256 hex digest of the password
    pub password_hash: String,

    /// Email address (optional)
    #[serde(default)]
    pub email: String,

    /// Full name (optional)
    #[serde(default)]
    pub full_name: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the user last authenticated successfully
    pub last_login: Option<DateTime<Utc>>,

    /// Display preferences
    #[serde(default)]
    pub preferences: Preferences,
}

impl UserAccount {
    /// Create a new account with default preferences
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            email: String::new(),
            full_name: String::new(),
            created_at: Utc::now(),
            last_login: None,
            preferences: Preferences::default(),
        }
    }

    /// Record a successful login
    pub fn record_login(&mut self) {
        self.last_login = Some(Utc::now());
    }
}
