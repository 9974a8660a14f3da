//! Reporting service
//!
//! Monthly and yearly summaries over a user's ledger: totals, net, expense
//! breakdown by category, and per-month breakdowns for a year.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::error::SpendlogResult;
use crate::models::{ExpenseCategory, Money, Transaction, TransactionKind};
use crate::session::Session;
use crate::storage::Storage;

/// Summary of one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_income: Money,
    pub total_expenses: Money,
    pub net: Money,
    pub expenses_by_category: BTreeMap<ExpenseCategory, Money>,
}

/// Summary of one calendar year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlySummary {
    pub year: i32,
    pub total_income: Money,
    pub total_expenses: Money,
    pub net: Money,
    pub expenses_by_category: BTreeMap<ExpenseCategory, Money>,
    /// Income per month (1-12), months with no entries absent
    pub income_by_month: BTreeMap<u32, Money>,
    /// Expenses per month (1-12), months with no entries absent
    pub expenses_by_month: BTreeMap<u32, Money>,
}

/// Service for ledger summaries
pub struct ReportService<'a> {
    storage: &'a Storage,
}

impl<'a> ReportService<'a> {
    /// Create a new report service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Summarize one month of the session user's ledger
    pub fn monthly_summary(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> SpendlogResult<MonthlySummary> {
        let transactions = self.storage.ledgers.get_all(session.username())?;
        let in_month: Vec<_> = transactions
            .iter()
            .filter(|t| t.in_month(year, month))
            .collect();

        let total_income = sum_kind(&in_month, TransactionKind::Income);
        let total_expenses = sum_kind(&in_month, TransactionKind::Expense);

        Ok(MonthlySummary {
            year,
            month,
            total_income,
            total_expenses,
            net: total_income - total_expenses,
            expenses_by_category: category_totals(&in_month),
        })
    }

    /// Summarize one year of the session user's ledger
    pub fn yearly_summary(&self, session: &Session, year: i32) -> SpendlogResult<YearlySummary> {
        let transactions = self.storage.ledgers.get_all(session.username())?;
        let in_year: Vec<_> = transactions
            .iter()
            .filter(|t| t.date.year() == year)
            .collect();

        let total_income = sum_kind(&in_year, TransactionKind::Income);
        let total_expenses = sum_kind(&in_year, TransactionKind::Expense);

        let mut income_by_month = BTreeMap::new();
        let mut expenses_by_month = BTreeMap::new();
        for txn in &in_year {
            let entry = match txn.kind {
                TransactionKind::Income => income_by_month.entry(txn.date.month()),
                TransactionKind::Expense => expenses_by_month.entry(txn.date.month()),
            };
            *entry.or_insert(Money::zero()) += txn.amount;
        }

        Ok(YearlySummary {
            year,
            total_income,
            total_expenses,
            net: total_income - total_expenses,
            expenses_by_category: category_totals(&in_year),
            income_by_month,
            expenses_by_month,
        })
    }

    /// All years present in the session user's ledger, ascending
    ///
    /// An empty ledger yields just the current year.
    pub fn all_years(&self, session: &Session) -> SpendlogResult<Vec<i32>> {
        let transactions = self.storage.ledgers.get_all(session.username())?;
        let mut years: Vec<i32> = transactions.iter().map(|t| t.date.year()).collect();
        years.sort_unstable();
        years.dedup();

        if years.is_empty() {
            years.push(chrono::Utc::now().date_naive().year());
        }
        Ok(years)
    }
}

fn sum_kind(transactions: &[&Transaction], kind: TransactionKind) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

fn category_totals(transactions: &[&Transaction]) -> BTreeMap<ExpenseCategory, Money> {
    let mut totals = BTreeMap::new();
    for txn in transactions {
        if let Some(category) = txn.category {
            *totals.entry(category).or_insert(Money::zero()) += txn.amount;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppPaths;
    use crate::services::auth::{AuthService, RegisterInput};
    use crate::services::ledger::{AddExpenseInput, AddIncomeInput, LedgerService};
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

    fn add_expense(
        storage: &Storage,
        session: &Session,
        cents: i64,
        date: (i32, u32, u32),
        category: ExpenseCategory,
    ) {
        LedgerService::new(storage)
            .add_expense(
                session,
                AddExpenseInput {
                    amount: Money::from_cents(cents),
                    date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                    category,
                    description: String::new(),
                },
            )
            .unwrap();
    }

    fn add_income(storage: &Storage, session: &Session, cents: i64, date: (i32, u32, u32)) {
        LedgerService::new(storage)
            .add_income(
                session,
                AddIncomeInput {
                    amount: Money::from_cents(cents),
                    date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                    source: "Salary".to_string(),
                    description: String::new(),
                },
            )
            .unwrap();
    }

    #[test]
    fn test_monthly_summary() {
        let (_temp_dir, storage, session) = setup();

        add_income(&storage, &session, 300000, (2024, 5, 1));
        add_expense(&storage, &session, 4250, (2024, 5, 1), ExpenseCategory::FoodAndDining);
        add_expense(&storage, &session, 8000, (2024, 5, 15), ExpenseCategory::FoodAndDining);
        add_expense(&storage, &session, 12000, (2024, 5, 20), ExpenseCategory::Housing);
        // Outside the month
        add_expense(&storage, &session, 9999, (2024, 6, 1), ExpenseCategory::Travel);

        let service = ReportService::new(&storage);
        let summary = service.monthly_summary(&session, 2024, 5).unwrap();

        assert_eq!(summary.total_income.cents(), 300000);
        assert_eq!(summary.total_expenses.cents(), 24250);
        assert_eq!(summary.net.cents(), 275750);
        assert_eq!(
            summary.expenses_by_category[&ExpenseCategory::FoodAndDining].cents(),
            12250
        );
        assert_eq!(
            summary.expenses_by_category[&ExpenseCategory::Housing].cents(),
            12000
        );
        assert!(!summary
            .expenses_by_category
            .contains_key(&ExpenseCategory::Travel));
    }

    #[test]
    fn test_monthly_summary_empty_month() {
        let (_temp_dir, storage, session) = setup();

        let summary = ReportService::new(&storage)
            .monthly_summary(&session, 2024, 5)
            .unwrap();
        assert!(summary.total_income.is_zero());
        assert!(summary.total_expenses.is_zero());
        assert!(summary.net.is_zero());
        assert!(summary.expenses_by_category.is_empty());
    }

    #[test]
    fn test_net_can_go_negative() {
        let (_temp_dir, storage, session) = setup();

        add_income(&storage, &session, 1000, (2024, 5, 1));
        add_expense(&storage, &session, 2500, (2024, 5, 2), ExpenseCategory::Other);

        let summary = ReportService::new(&storage)
            .monthly_summary(&session, 2024, 5)
            .unwrap();
        assert_eq!(summary.net.cents(), -1500);
    }

    #[test]
    fn test_yearly_summary() {
        let (_temp_dir, storage, session) = setup();

        add_income(&storage, &session, 300000, (2024, 1, 31));
        add_income(&storage, &session, 300000, (2024, 2, 28));
        add_expense(&storage, &session, 50000, (2024, 1, 5), ExpenseCategory::Housing);
        add_expense(&storage, &session, 60000, (2024, 2, 5), ExpenseCategory::Housing);
        // Different year
        add_expense(&storage, &session, 7000, (2023, 12, 31), ExpenseCategory::Travel);

        let summary = ReportService::new(&storage)
            .yearly_summary(&session, 2024)
            .unwrap();

        assert_eq!(summary.total_income.cents(), 600000);
        assert_eq!(summary.total_expenses.cents(), 110000);
        assert_eq!(summary.net.cents(), 490000);
        assert_eq!(summary.income_by_month[&1].cents(), 300000);
        assert_eq!(summary.income_by_month[&2].cents(), 300000);
        assert_eq!(summary.expenses_by_month[&2].cents(), 60000);
        assert!(!summary.expenses_by_month.contains_key(&12));
        assert_eq!(
            summary.expenses_by_category[&ExpenseCategory::Housing].cents(),
            110000
        );
    }

    #[test]
    fn test_all_years() {
        let (_temp_dir, storage, session) = setup();
        let service = ReportService::new(&storage);

        // Empty ledger falls back to the current year
        let years = service.all_years(&session).unwrap();
        assert_eq!(years.len(), 1);

        add_expense(&storage, &session, 100, (2022, 3, 1), ExpenseCategory::Other);
        add_expense(&storage, &session, 100, (2024, 3, 1), ExpenseCategory::Other);
        add_income(&storage, &session, 100, (2022, 7, 1));

        assert_eq!(service.all_years(&session).unwrap(), vec![2022, 2024]);
    }
}
