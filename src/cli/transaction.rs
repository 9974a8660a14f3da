//! Ledger CLI commands
//!
//! Adding income and expense entries, listing with filters, and deleting.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use clap::Args;

use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{ExpenseCategory, Money, TransactionId, TransactionKind};
use crate::services::{AddExpenseInput, AddIncomeInput, LedgerFilter, LedgerService};
use crate::session::Session;
use crate::storage::Storage;

/// Arguments for adding an income entry
#[derive(Args)]
pub struct AddIncomeArgs {
    /// Amount (e.g. "3000" or "3000.00")
    pub amount: String,

    /// Where the income came from (e.g. "Salary")
    #[arg(short, long, default_value = "")]
    pub source: String,

    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Free-form note
    #[arg(long, default_value = "")]
    pub description: String,
}

/// Arguments for adding an expense entry
#[derive(Args)]
pub struct AddExpenseArgs {
    /// Amount (e.g. "42.50")
    pub amount: String,

    /// Expense category (e.g. "Food & Dining", case-insensitive)
    pub category: String,

    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Free-form note
    #[arg(long, default_value = "")]
    pub description: String,
}

/// Arguments for listing transactions
#[derive(Args)]
pub struct ListArgs {
    /// Restrict to one month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Restrict to one year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Restrict to one expense category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Restrict to "income" or "expense" entries
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Maximum number of entries to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    pub fn into_filter(self) -> SpendlogResult<LedgerFilter> {
        let mut filter = LedgerFilter::new();

        if let Some(month) = self.month {
            let (year, month) = parse_period(&month)?;
            filter = filter.month(year, month);
        } else if let Some(year) = self.year {
            filter = filter.year(year);
        }

        if let Some(category) = self.category {
            filter = filter.category(parse_category(&category)?);
        }
        if let Some(kind) = self.kind {
            filter = filter.kind(parse_kind(&kind)?);
        }
        if let Some(limit) = self.limit {
            filter = filter.limit(limit);
        }

        Ok(filter)
    }
}

/// Handle the income command
pub fn handle_add_income(
    storage: &Storage,
    session: &Session,
    args: AddIncomeArgs,
) -> SpendlogResult<()> {
    let txn = LedgerService::new(storage).add_income(
        session,
        AddIncomeInput {
            amount: parse_amount(&args.amount)?,
            date: parse_date(args.date.as_deref())?,
            source: args.source,
            description: args.description,
        },
    )?;

    println!("Recorded income:");
    print!("{}", format_transaction_details(&txn));
    Ok(())
}

/// Handle the expense command
pub fn handle_add_expense(
    storage: &Storage,
    session: &Session,
    args: AddExpenseArgs,
) -> SpendlogResult<()> {
    let txn = LedgerService::new(storage).add_expense(
        session,
        AddExpenseInput {
            amount: parse_amount(&args.amount)?,
            date: parse_date(args.date.as_deref())?,
            category: parse_category(&args.category)?,
            description: args.description,
        },
    )?;

    println!("Recorded expense:");
    print!("{}", format_transaction_details(&txn));
    Ok(())
}

/// Handle the list command
pub fn handle_list(storage: &Storage, session: &Session, args: ListArgs) -> SpendlogResult<()> {
    let transactions = LedgerService::new(storage).list(session, args.into_filter()?)?;
    print!("{}", format_transaction_register(&transactions));
    Ok(())
}

/// Handle the delete command
pub fn handle_delete(storage: &Storage, session: &Session, id: &str) -> SpendlogResult<()> {
    let service = LedgerService::new(storage);
    let id = resolve_transaction_id(&service, session, id)?;

    let removed = service.delete(session, id)?;
    println!("Deleted {} from {}", removed.amount, removed.date);
    Ok(())
}

/// Resolve a full or short id (as printed by list) to a transaction id
fn resolve_transaction_id(
    service: &LedgerService<'_>,
    session: &Session,
    s: &str,
) -> SpendlogResult<TransactionId> {
    if let Ok(id) = TransactionId::from_str(s) {
        return Ok(id);
    }

    let needle = s.strip_prefix("txn-").unwrap_or(s);
    let matches: Vec<TransactionId> = service
        .list(session, LedgerFilter::new())?
        .into_iter()
        .filter(|t| t.id.as_uuid().to_string().starts_with(needle))
        .map(|t| t.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(SpendlogError::transaction_not_found(s)),
        _ => Err(SpendlogError::Validation(format!(
            "Transaction id '{s}' is ambiguous, give more characters"
        ))),
    }
}

pub(crate) fn parse_amount(s: &str) -> SpendlogResult<Money> {
    Money::parse(s).map_err(|e| SpendlogError::Validation(format!("Invalid amount: {e}")))
}

pub(crate) fn parse_date(s: Option<&str>) -> SpendlogResult<NaiveDate> {
    match s {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            SpendlogError::Validation(format!("Invalid date '{s}', expected YYYY-MM-DD"))
        }),
        None => Ok(Utc::now().date_naive()),
    }
}

/// Parse a "YYYY-MM" period string
pub(crate) fn parse_period(s: &str) -> SpendlogResult<(i32, u32)> {
    let parsed = s
        .split_once('-')
        .and_then(|(y, m)| Some((y.parse::<i32>().ok()?, m.parse::<u32>().ok()?)))
        .filter(|&(_, m)| (1..=12).contains(&m));

    parsed.ok_or_else(|| {
        SpendlogError::Validation(format!("Invalid period '{s}', expected YYYY-MM"))
    })
}

/// The current (year, month)
pub(crate) fn current_period() -> (i32, u32) {
    let today = Utc::now().date_naive();
    (today.year(), today.month())
}

pub(crate) fn parse_category(s: &str) -> SpendlogResult<ExpenseCategory> {
    ExpenseCategory::from_str(s).map_err(|_| {
        let names: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.name()).collect();
        SpendlogError::Validation(format!(
            "Unknown category '{}'. Valid categories: {}",
            s,
            names.join(", ")
        ))
    })
}

pub(crate) fn parse_kind(s: &str) -> SpendlogResult<TransactionKind> {
    match s.to_ascii_lowercase().as_str() {
        "income" => Ok(TransactionKind::Income),
        "expense" => Ok(TransactionKind::Expense),
        _ => Err(SpendlogError::Validation(format!(
            "Unknown kind '{s}', expected \"income\" or \"expense\""
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period() {
        assert_eq!(parse_period("2024-05").unwrap(), (2024, 5));
        assert_eq!(parse_period("2023-12").unwrap(), (2023, 12));
        assert!(parse_period("2024").is_err());
        assert!(parse_period("2024-13").is_err());
        assert!(parse_period("May 2024").is_err());
    }

    #[test]
    fn test_parse_date_defaults_to_today() {
        assert_eq!(parse_date(None).unwrap(), Utc::now().date_naive());
        assert_eq!(
            parse_date(Some("2024-05-01")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(parse_date(Some("01/05/2024")).is_err());
    }

    #[test]
    fn test_parse_category_error_lists_valid_names() {
        assert_eq!(
            parse_category("food & dining").unwrap(),
            ExpenseCategory::FoodAndDining
        );
        let err = parse_category("fuel").unwrap_err();
        assert!(err.to_string().contains("Transportation"));
    }

    #[test]
    fn test_list_args_into_filter() {
        let filter = ListArgs {
            month: Some("2024-05".to_string()),
            year: None,
            category: Some("Travel".to_string()),
            kind: Some("expense".to_string()),
            limit: Some(10),
        }
        .into_filter()
        .unwrap();

        assert_eq!(filter.year, Some(2024));
        assert_eq!(filter.month, Some(5));
        assert_eq!(filter.category, Some(ExpenseCategory::Travel));
        assert_eq!(filter.kind, Some(TransactionKind::Expense));
        assert_eq!(filter.limit, Some(10));
    }
}
