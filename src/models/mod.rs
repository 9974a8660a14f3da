//! Core data models

pub mod account;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Preferences, UserAccount};
pub use category::ExpenseCategory;
pub use ids::{AccountId, TransactionId};
pub use money::Money;
pub use transaction::{Transaction, TransactionKind};
