//! Ledger service
//!
//! Session-scoped access to a user's transactions: add income or expense
//! entries, list with filtering, delete. Every operation is keyed by the
//! session's username, so one user's records are invisible to every other
//! authenticated user.

use chrono::NaiveDate;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{ExpenseCategory, Money, Transaction, TransactionId, TransactionKind};
use crate::session::Session;
use crate::storage::Storage;

/// Options for filtering a ledger listing
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    /// Filter by year
    pub year: Option<i32>,
    /// Filter by month (1-12), only meaningful together with a year
    pub month: Option<u32>,
    /// Filter by expense category
    pub category: Option<ExpenseCategory>,
    /// Filter by kind
    pub kind: Option<TransactionKind>,
    /// Maximum number of entries to return
    pub limit: Option<usize>,
}

impl LedgerFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by year
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Filter by year and month
    pub fn month(mut self, year: i32, month: u32) -> Self {
        self.year = Some(year);
        self.month = Some(month);
        self
    }

    /// Filter by expense category
    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by kind
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        use chrono::Datelike;

        if let Some(year) = self.year {
            if txn.date.year() != year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if txn.date.month() != month {
                return false;
            }
        }
        if let Some(category) = self.category {
            if txn.category != Some(category) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        true
    }
}

/// Input for adding an income entry
#[derive(Debug, Clone)]
pub struct AddIncomeInput {
    pub amount: Money,
    pub date: NaiveDate,
    pub source: String,
    pub description: String,
}

/// Input for adding an expense entry
#[derive(Debug, Clone)]
pub struct AddExpenseInput {
    pub amount: Money,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub description: String,
}

/// Service for session-scoped ledger access
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add an income entry to the session user's ledger
    pub fn add_income(
        &self,
        session: &Session,
        input: AddIncomeInput,
    ) -> SpendlogResult<Transaction> {
        let txn = Transaction::income(input.amount, input.date, input.source, input.description);
        txn.validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        self.storage
            .ledgers
            .append(session.username(), txn.clone())?;
        Ok(txn)
    }

    /// Add an expense entry to the session user's ledger
    pub fn add_expense(
        &self,
        session: &Session,
        input: AddExpenseInput,
    ) -> SpendlogResult<Transaction> {
        let txn = Transaction::expense(input.amount, input.date, input.category, input.description);
        txn.validate()
            .map_err(|e| SpendlogError::Validation(e.to_string()))?;

        self.storage
            .ledgers
            .append(session.username(), txn.clone())?;
        Ok(txn)
    }

    /// List the session user's transactions with optional filtering
    pub fn list(&self, session: &Session, filter: LedgerFilter) -> SpendlogResult<Vec<Transaction>> {
        let mut transactions = self.storage.ledgers.get_all(session.username())?;
        transactions.retain(|t| filter.matches(t));

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Delete a transaction from the session user's ledger
    pub fn delete(&self, session: &Session, id: TransactionId) -> SpendlogResult<Transaction> {
        self.storage
            .ledgers
            .delete(session.username(), id)?
            .ok_or_else(|| SpendlogError::transaction_not_found(id.to_string()))
    }

    /// Count the session user's transactions
    pub fn count(&self, session: &Session) -> SpendlogResult<usize> {
        self.storage.ledgers.count(session.username())
    }
}
