//! Locally computed financial metrics
//!
//! Everything here is derived from the user's own ledger without any network
//! access. The metrics feed both the insight-service prompt (aggregates only,
//! never raw transactions) and the local fallback score.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{ExpenseCategory, Money, Transaction, TransactionKind};

/// Direction of recent spending, month over month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for SpendingTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// How steady recent income has been
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeConsistency {
    Consistent,
    Stable,
    Variable,
}

impl fmt::Display for IncomeConsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consistent => write!(f, "consistent"),
            Self::Stable => write!(f, "stable"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

/// Income/expense figures for one of the trailing months
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyFigures {
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

/// Aggregated financial metrics over a user's ledger
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialMetrics {
    pub total_income: Money,
    pub total_expenses: Money,
    pub current_month_income: Money,
    pub current_month_expenses: Money,
    pub avg_monthly_income: Money,
    pub avg_monthly_expenses: Money,
    /// Current-month savings rate in percent; zero when there is no income
    pub savings_rate: f64,
    /// Expense totals per category over the trailing three months
    pub expenses_by_category: BTreeMap<ExpenseCategory, Money>,
    pub spending_trend: SpendingTrend,
    pub income_consistency: IncomeConsistency,
    /// Trailing three months, most recent first
    pub monthly: Vec<MonthlyFigures>,
    pub income_count: usize,
    pub expense_count: usize,
}

impl FinancialMetrics {
    /// Compute metrics over a ledger, relative to the given reference date
    pub fn compute(transactions: &[Transaction], today: NaiveDate) -> Self {
        let window = trailing_months(today, 3);

        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();
        let mut income_count = 0;
        let mut expense_count = 0;

        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => {
                    total_income += txn.amount;
                    income_count += 1;
                }
                TransactionKind::Expense => {
                    total_expenses += txn.amount;
                    expense_count += 1;
                }
            }
        }

        let mut monthly = Vec::with_capacity(window.len());
        for &(year, month) in &window {
            let mut income = Money::zero();
            let mut expenses = Money::zero();
            for txn in transactions.iter().filter(|t| t.in_month(year, month)) {
                match txn.kind {
                    TransactionKind::Income => income += txn.amount,
                    TransactionKind::Expense => expenses += txn.amount,
                }
            }
            monthly.push(MonthlyFigures {
                year,
                month,
                income,
                expenses,
                net: income - expenses,
            });
        }

        let months = monthly.len() as i64;
        let avg_monthly_income =
            Money::from_cents(monthly.iter().map(|m| m.income.cents()).sum::<i64>() / months);
        let avg_monthly_expenses =
            Money::from_cents(monthly.iter().map(|m| m.expenses.cents()).sum::<i64>() / months);

        let current_month_income = monthly[0].income;
        let current_month_expenses = monthly[0].expenses;

        let savings_rate = if current_month_income.is_positive() {
            (current_month_income - current_month_expenses).cents() as f64
                / current_month_income.cents() as f64
                * 100.0
        } else {
            0.0
        };

        let mut expenses_by_category = BTreeMap::new();
        for txn in transactions {
            if let (Some(category), true) = (
                txn.category,
                window.iter().any(|&(y, m)| txn.in_month(y, m)),
            ) {
                *expenses_by_category.entry(category).or_insert(Money::zero()) += txn.amount;
            }
        }

        Self {
            total_income,
            total_expenses,
            current_month_income,
            current_month_expenses,
            avg_monthly_income,
            avg_monthly_expenses,
            savings_rate,
            expenses_by_category,
            spending_trend: classify_spending(&monthly),
            income_consistency: classify_income(&monthly),
            monthly,
            income_count,
            expense_count,
        }
    }
}

/// The last `count` (year, month) pairs ending at the reference date's month,
/// most recent first
fn trailing_months(today: NaiveDate, count: u32) -> Vec<(i32, u32)> {
    let mut months = Vec::with_capacity(count as usize);
    let mut year = today.year();
    let mut month = today.month() as i32;
    for _ in 0..count {
        if month <= 0 {
            month += 12;
            year -= 1;
        }
        months.push((year, month as u32));
        month -= 1;
    }
    months
}

/// More than 10% above last month's spending is increasing, more than 10%
/// below is decreasing.
fn classify_spending(monthly: &[MonthlyFigures]) -> SpendingTrend {
    if monthly.len() < 2 {
        return SpendingTrend::Stable;
    }
    let current = monthly[0].expenses.cents() as f64;
    let previous = monthly[1].expenses.cents() as f64;

    if current > previous * 1.1 {
        SpendingTrend::Increasing
    } else if current < previous * 0.9 {
        SpendingTrend::Decreasing
    } else {
        SpendingTrend::Stable
    }
}

/// Month-over-month income variance above 20% is variable, below 5% is
/// consistent.
fn classify_income(monthly: &[MonthlyFigures]) -> IncomeConsistency {
    if monthly.len() < 2 {
        return IncomeConsistency::Stable;
    }
    let current = monthly[0].income.cents() as f64;
    let previous = monthly[1].income.cents() as f64;
    let peak = current.max(previous);
    if peak <= 0.0 {
        return IncomeConsistency::Stable;
    }

    let variance = (current - previous).abs() / peak;
    if variance > 0.2 {
        IncomeConsistency::Variable
    } else if variance < 0.05 {
        IncomeConsistency::Consistent
    } else {
        IncomeConsistency::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn income(cents: i64, year: i32, month: u32) -> Transaction {
        Transaction::income(Money::from_cents(cents), date(year, month, 1), "Salary", "")
    }

    fn expense(cents: i64, year: i32, month: u32, category: ExpenseCategory) -> Transaction {
        Transaction::expense(Money::from_cents(cents), date(year, month, 5), category, "")
    }

    #[test]
    fn test_trailing_months_across_year_boundary() {
        assert_eq!(
            trailing_months(date(2024, 5, 15), 3),
            vec![(2024, 5), (2024, 4), (2024, 3)]
        );
        assert_eq!(
            trailing_months(date(2024, 1, 10), 3),
            vec![(2024, 1), (2023, 12), (2023, 11)]
        );
    }

    #[test]
    fn test_basic_metrics() {
        let transactions = vec![
            income(300000, 2024, 5),
            income(300000, 2024, 4),
            expense(100000, 2024, 5, ExpenseCategory::Housing),
            expense(50000, 2024, 5, ExpenseCategory::FoodAndDining),
            expense(140000, 2024, 4, ExpenseCategory::Housing),
            // Outside the 3-month window
            expense(990000, 2023, 11, ExpenseCategory::Travel),
        ];

        let metrics = FinancialMetrics::compute(&transactions, date(2024, 5, 15));

        assert_eq!(metrics.total_income.cents(), 600000);
        assert_eq!(metrics.total_expenses.cents(), 1280000);
        assert_eq!(metrics.current_month_income.cents(), 300000);
        assert_eq!(metrics.current_month_expenses.cents(), 150000);
        // (3000 - 1500) / 3000 = 50%
        assert!((metrics.savings_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(metrics.income_count, 2);
        assert_eq!(metrics.expense_count, 4);

        // Category totals only cover the trailing window
        assert_eq!(
            metrics.expenses_by_category[&ExpenseCategory::Housing].cents(),
            240000
        );
        assert!(!metrics
            .expenses_by_category
            .contains_key(&ExpenseCategory::Travel));

        assert_eq!(metrics.monthly.len(), 3);
        assert_eq!(metrics.monthly[0].month, 5);
        assert_eq!(metrics.monthly[2].month, 3);
    }

    #[test]
    fn test_savings_rate_zero_without_income() {
        let transactions = vec![expense(5000, 2024, 5, ExpenseCategory::Other)];
        let metrics = FinancialMetrics::compute(&transactions, date(2024, 5, 15));
        assert_eq!(metrics.savings_rate, 0.0);
    }

    #[test]
    fn test_spending_trend_classification() {
        // 250 this month vs 100 last month: increasing
        let increasing = vec![
            expense(25000, 2024, 5, ExpenseCategory::Other),
            expense(10000, 2024, 4, ExpenseCategory::Other),
        ];
        assert_eq!(
            FinancialMetrics::compute(&increasing, date(2024, 5, 15)).spending_trend,
            SpendingTrend::Increasing
        );

        // 50 vs 100: decreasing
        let decreasing = vec![
            expense(5000, 2024, 5, ExpenseCategory::Other),
            expense(10000, 2024, 4, ExpenseCategory::Other),
        ];
        assert_eq!(
            FinancialMetrics::compute(&decreasing, date(2024, 5, 15)).spending_trend,
            SpendingTrend::Decreasing
        );

        // 105 vs 100: within 10%, stable
        let stable = vec![
            expense(10500, 2024, 5, ExpenseCategory::Other),
            expense(10000, 2024, 4, ExpenseCategory::Other),
        ];
        assert_eq!(
            FinancialMetrics::compute(&stable, date(2024, 5, 15)).spending_trend,
            SpendingTrend::Stable
        );
    }

    #[test]
    fn test_income_consistency_classification() {
        // Identical months: consistent
        let consistent = vec![income(300000, 2024, 5), income(300000, 2024, 4)];
        assert_eq!(
            FinancialMetrics::compute(&consistent, date(2024, 5, 15)).income_consistency,
            IncomeConsistency::Consistent
        );

        // 300 vs 200: 33% swing, variable
        let variable = vec![income(300000, 2024, 5), income(200000, 2024, 4)];
        assert_eq!(
            FinancialMetrics::compute(&variable, date(2024, 5, 15)).income_consistency,
            IncomeConsistency::Variable
        );

        // 300 vs 270: 10% swing, stable
        let stable = vec![income(300000, 2024, 5), income(270000, 2024, 4)];
        assert_eq!(
            FinancialMetrics::compute(&stable, date(2024, 5, 15)).income_consistency,
            IncomeConsistency::Stable
        );
    }

    #[test]
    fn test_empty_ledger() {
        let metrics = FinancialMetrics::compute(&[], date(2024, 5, 15));
        assert!(metrics.total_income.is_zero());
        assert!(metrics.expenses_by_category.is_empty());
        assert_eq!(metrics.spending_trend, SpendingTrend::Stable);
        assert_eq!(metrics.income_consistency, IncomeConsistency::Stable);
    }
}
