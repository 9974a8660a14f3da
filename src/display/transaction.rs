//! Transaction display formatting
//!
//! Provides utilities for formatting ledger entries for terminal display,
//! including register views.

use crate::models::{Transaction, TransactionKind};

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction) -> String {
    let label = match txn.kind {
        TransactionKind::Income => &txn.source,
        TransactionKind::Expense => txn.category.map(|c| c.name()).unwrap_or("(uncategorized)"),
    };

    let amount = match txn.kind {
        TransactionKind::Income => format!("+{}", txn.amount),
        TransactionKind::Expense => format!("-{}", txn.amount),
    };

    format!(
        "{} {} {:20} {:>12}  {}",
        txn.date.format("%Y-%m-%d"),
        kind_icon(txn.kind),
        truncate(label, 20),
        amount,
        txn.id
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {} {:20} {:>12}  {}\n",
        "Date", "K", "Category/Source", "Amount", "ID"
    ));
    output.push_str(&"-".repeat(62));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount));

    match txn.kind {
        TransactionKind::Income => {
            if !txn.source.is_empty() {
                output.push_str(&format!("Source:      {}\n", txn.source));
            }
        }
        TransactionKind::Expense => match txn.category {
            Some(category) => output.push_str(&format!("Category:    {category}\n")),
            None => output.push_str("Category:    (uncategorized)\n"),
        },
    }

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

fn kind_icon(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "↑",
        TransactionKind::Expense => "↓",
    }
}

/// Truncate a string to a maximum number of characters
///
/// Counts characters, not bytes, so multi-byte input never splits mid-char.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_format_expense_row() {
        let txn = Transaction::expense(
            Money::from_cents(4250),
            date(2024, 5, 1),
            ExpenseCategory::FoodAndDining,
            "team lunch",
        );

        let formatted = format_transaction_row(&txn);
        assert!(formatted.contains("2024-05-01"));
        assert!(formatted.contains("Food & Dining"));
        assert!(formatted.contains("-$42.50"));
    }

    #[test]
    fn test_format_income_row() {
        let txn = Transaction::income(Money::from_cents(300000), date(2024, 5, 1), "Salary", "");

        let formatted = format_transaction_row(&txn);
        assert!(formatted.contains("Salary"));
        assert!(formatted.contains("+$3000.00"));
    }

    #[test]
    fn test_format_empty_register() {
        let formatted = format_transaction_register(&[]);
        assert!(formatted.contains("No transactions found"));
    }

    #[test]
    fn test_format_transaction_details() {
        let txn = Transaction::expense(
            Money::from_cents(4250),
            date(2024, 5, 1),
            ExpenseCategory::Transportation,
            "bus pass",
        );

        let formatted = format_transaction_details(&txn);
        assert!(formatted.contains("Transportation"));
        assert!(formatted.contains("bus pass"));
        assert!(formatted.contains("$42.50"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10).trim(), "Short");
        let result = truncate("A very long string", 10);
        assert!(result.len() <= 10);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte() {
        // 11 chars but 22 bytes; fits in 20 chars, must not slice mid-char
        assert_eq!(truncate("ééééééééééé", 20).trim(), "ééééééééééé");

        let long = "é".repeat(30);
        let result = truncate(&long, 20);
        assert_eq!(result.chars().count(), 20);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_format_row_with_multibyte_source() {
        let txn = Transaction::income(
            Money::from_cents(100000),
            date(2024, 5, 1),
            "Café Münchhausen Straße",
            "",
        );

        let formatted = format_transaction_row(&txn);
        assert!(formatted.contains("+$1000.00"));
        assert!(formatted.contains("Café"));
    }
}
