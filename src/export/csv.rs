//! CSV export
//!
//! Writes a user's ledger as spreadsheet-compatible CSV. Column layout is
//! fixed; amounts are plain decimals without a currency symbol so the file
//! imports cleanly.

use std::io::Write;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{Transaction, TransactionKind};
use crate::services::{LedgerFilter, LedgerService};
use crate::session::Session;
use crate::storage::Storage;

/// Export the session user's transactions to CSV
pub fn export_transactions_csv<W: Write>(
    storage: &Storage,
    session: &Session,
    filter: LedgerFilter,
    writer: &mut W,
) -> SpendlogResult<usize> {
    let transactions = LedgerService::new(storage).list(session, filter)?;
    write_transactions_csv(&transactions, writer)?;
    Ok(transactions.len())
}

/// Write transactions as CSV rows with a header line
pub fn write_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> SpendlogResult<()> {
    writeln!(writer, "ID,Date,Kind,Amount,Category,Source,Description")
        .map_err(|e| SpendlogError::Export(e.to_string()))?;

    for txn in transactions {
        let kind = match txn.kind {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        let category = txn.category.map(|c| c.name()).unwrap_or_default();

        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            txn.id,
            txn.date,
            kind,
            txn.amount.to_decimal_string(),
            escape_csv(category),
            escape_csv(&txn.source),
            escape_csv(&txn.description)
        )
        .map_err(|e| SpendlogError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppPaths;
    use crate::models::{ExpenseCategory, Money};
    use crate::services::{AddExpenseInput, AddIncomeInput, AuthService, RegisterInput};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Session) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let auth = AuthService::new(&storage);
        auth.register(RegisterInput {
            username: "bob".to_string(),
            password: "secret1".to_string(),
            ..Default::default()
        })
        .unwrap();
        let session = auth.authenticate("bob", "secret1").unwrap();
        (temp_dir, storage, session)
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_export_transactions_csv() {
        let (_temp_dir, storage, session) = setup();
        let ledger = LedgerService::new(&storage);

        ledger
            .add_expense(
                &session,
                AddExpenseInput {
                    amount: Money::from_cents(4250),
                    date: date(2024, 5, 1),
                    category: ExpenseCategory::FoodAndDining,
                    description: "team lunch".to_string(),
                },
            )
            .unwrap();
        ledger
            .add_income(
                &session,
                AddIncomeInput {
                    amount: Money::from_cents(300000),
                    date: date(2024, 5, 1),
                    source: "Salary".to_string(),
                    description: String::new(),
                },
            )
            .unwrap();

        let mut csv_output = Vec::new();
        let count =
            export_transactions_csv(&storage, &session, LedgerFilter::new(), &mut csv_output)
                .unwrap();
        assert_eq!(count, 2);

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.starts_with("ID,Date,Kind,Amount,Category,Source,Description"));
        // The amount column sits directly before the category column
        assert!(csv_string.contains("42.50,Food & Dining"));
        assert!(csv_string.contains("3000.00,,Salary"));
        assert!(csv_string.contains("2024-05-01"));
    }

    #[test]
    fn test_export_honors_filter() {
        let (_temp_dir, storage, session) = setup();
        let ledger = LedgerService::new(&storage);

        ledger
            .add_expense(
                &session,
                AddExpenseInput {
                    amount: Money::from_cents(1000),
                    date: date(2024, 5, 1),
                    category: ExpenseCategory::Travel,
                    description: String::new(),
                },
            )
            .unwrap();
        ledger
            .add_expense(
                &session,
                AddExpenseInput {
                    amount: Money::from_cents(2000),
                    date: date(2024, 6, 1),
                    category: ExpenseCategory::Shopping,
                    description: String::new(),
                },
            )
            .unwrap();

        let mut csv_output = Vec::new();
        let count = export_transactions_csv(
            &storage,
            &session,
            LedgerFilter::new().month(2024, 5),
            &mut csv_output,
        )
        .unwrap();
        assert_eq!(count, 1);

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.contains("Travel"));
        assert!(!csv_string.contains("Shopping"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_description_with_comma_is_quoted() {
        let (_temp_dir, storage, session) = setup();
        LedgerService::new(&storage)
            .add_expense(
                &session,
                AddExpenseInput {
                    amount: Money::from_cents(500),
                    date: date(2024, 5, 1),
                    category: ExpenseCategory::Other,
                    description: "one, two".to_string(),
                },
            )
            .unwrap();

        let mut csv_output = Vec::new();
        export_transactions_csv(&storage, &session, LedgerFilter::new(), &mut csv_output).unwrap();
        let csv_string = String::from_utf8(csv_output).unwrap();
        assert!(csv_string.contains("\"one, two\""));
    }

    #[test]
    fn test_empty_ledger_writes_header_only() {
        let (_temp_dir, storage, session) = setup();

        let mut csv_output = Vec::new();
        let count =
            export_transactions_csv(&storage, &session, LedgerFilter::new(), &mut csv_output)
                .unwrap();
        assert_eq!(count, 0);

        let csv_string = String::from_utf8(csv_output).unwrap();
        assert_eq!(
            csv_string.trim(),
            "ID,Date,Kind,Amount,Category,Source,Description"
        );
    }
}
