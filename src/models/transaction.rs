//! Transaction model
//!
//! A single income or expense entry in one user's ledger. Transactions are
//! immutable after creation; the only mutation the store supports is delete.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::TransactionId;
use super::money::Money;

/// Whether a transaction adds to or subtracts from the user's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier within the owner's ledger
    pub id: TransactionId,

    /// Income or expense
    pub kind: TransactionKind,

    /// Amount, always positive; the kind carries the sign
    pub amount: Money,

    /// Transaction date
    pub date: NaiveDate,

    /// Expense category (expenses only)
    pub category: Option<ExpenseCategory>,

    /// Income source, free text (income only)
    #[serde(default)]
    pub source: String,

    /// Description (optional)
    #[serde(default)]
    pub description: String,

    /// When the entry was recorded
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new income entry
    pub fn income(
        amount: Money,
        date: NaiveDate,
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind: TransactionKind::Income,
            amount,
            date,
            category: None,
            source: source.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a new expense entry
    pub fn expense(
        amount: Money,
        date: NaiveDate,
        category: ExpenseCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind: TransactionKind::Expense,
            amount,
            date,
            category: Some(category),
            source: String::new(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    /// Check if the entry falls within the given year and month
    pub fn in_month(&self, year: i32, month: u32) -> bool {
        use chrono::Datelike;
        self.date.year() == year && self.date.month() == month
    }

    /// Validate the entry's invariants
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        match self.kind {
            TransactionKind::Expense if self.category.is_none() => {
                Err(TransactionValidationError::ExpenseWithoutCategory)
            }
            TransactionKind::Income if self.category.is_some() => {
                Err(TransactionValidationError::IncomeWithCategory)
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            TransactionKind::Income => self.source.as_str(),
            TransactionKind::Expense => self.category.map(|c| c.name()).unwrap_or(""),
        };
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount,
            label
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    ExpenseWithoutCategory,
    IncomeWithCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive, got {}", amount)
            }
            Self::ExpenseWithoutCategory => {
                write!(f, "Expense entries require a category")
            }
            Self::IncomeWithCategory => {
                write!(f, "Income entries must not carry an expense category")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
