//! Custom error types for spendlog
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for spendlog operations
#[derive(Error, Debug)]
pub enum SpendlogError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and inputs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Username or password did not match a credential record
    ///
    /// Does not distinguish "unknown user" from "wrong password" so login
    /// errors leak nothing about registered names.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Password rejected at registration or password change
    #[error("Password must be at least {minimum} characters long")]
    WeakPassword { minimum: usize },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors (unreadable or unwritable persisted state)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Insight service errors (timeout, auth failure, malformed response)
    #[error("Insight service error: {0}")]
    Insight(String),
}

impl SpendlogError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for usernames
    pub fn duplicate_username(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SpendlogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendlogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for spendlog operations
pub type SpendlogResult<T> = Result<T, SpendlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpendlogError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = SpendlogError::transaction_not_found("txn-12ab34cd");
        assert_eq!(err.to_string(), "Transaction not found: txn-12ab34cd");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_username_error() {
        let err = SpendlogError::duplicate_username("bob");
        assert_eq!(err.to_string(), "User already exists: bob");
    }

    #[test]
    fn test_weak_password_message() {
        let err = SpendlogError::WeakPassword { minimum: 6 };
        assert_eq!(
            err.to_string(),
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn test_invalid_credentials_is_opaque() {
        let err = SpendlogError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SpendlogError = io_err.into();
        assert!(matches!(err, SpendlogError::Io(_)));
    }
}
