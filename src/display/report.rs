//! Report display formatting
//!
//! Renders monthly/yearly summaries and financial health reports for the
//! terminal.

use crate::insight::{HealthReport, ReportSource};
use crate::models::Money;
use crate::services::{MonthlySummary, YearlySummary};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// Format a monthly summary for display
pub fn format_monthly_summary(summary: &MonthlySummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Summary for {} {}\n",
        month_name(summary.month),
        summary.year
    ));
    output.push_str(&"-".repeat(40));
    output.push('\n');
    output.push_str(&format!("Income:   {:>12}\n", summary.total_income));
    output.push_str(&format!("Expenses: {:>12}\n", summary.total_expenses));
    output.push_str(&format!("Net:      {:>12}\n", summary.net));

    if !summary.expenses_by_category.is_empty() {
        output.push_str("\nExpenses by category:\n");
        let mut entries: Vec<_> = summary.expenses_by_category.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1));
        for (category, total) in entries {
            output.push_str(&format!("  {:20} {:>12}\n", category.name(), total));
        }
    }

    output
}

/// Format a yearly summary for display
pub fn format_yearly_summary(summary: &YearlySummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Summary for {}\n", summary.year));
    output.push_str(&"-".repeat(40));
    output.push('\n');
    output.push_str(&format!("Income:   {:>12}\n", summary.total_income));
    output.push_str(&format!("Expenses: {:>12}\n", summary.total_expenses));
    output.push_str(&format!("Net:      {:>12}\n", summary.net));

    let active_months: Vec<u32> = (1..=12)
        .filter(|m| {
            summary.income_by_month.contains_key(m) || summary.expenses_by_month.contains_key(m)
        })
        .collect();

    if !active_months.is_empty() {
        output.push_str(&format!(
            "\n{:10} {:>12} {:>12}\n",
            "Month", "Income", "Expenses"
        ));
        for month in active_months {
            let income = summary
                .income_by_month
                .get(&month)
                .copied()
                .unwrap_or(Money::zero());
            let expenses = summary
                .expenses_by_month
                .get(&month)
                .copied()
                .unwrap_or(Money::zero());
            output.push_str(&format!(
                "{:10} {:>12} {:>12}\n",
                month_name(month),
                income,
                expenses
            ));
        }
    }

    if !summary.expenses_by_category.is_empty() {
        output.push_str("\nExpenses by category:\n");
        let mut entries: Vec<_> = summary.expenses_by_category.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1));
        for (category, total) in entries {
            output.push_str(&format!("  {:20} {:>12}\n", category.name(), total));
        }
    }

    output
}

/// Format a financial health report for display
pub fn format_health_report(report: &HealthReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Financial Health Score: {}/100\n", report.score));
    if !report.score_explanation.is_empty() {
        output.push_str(&format!("{}\n", report.score_explanation));
    }
    match report.source {
        ReportSource::Model => output.push_str("(assessment by hosted model)\n"),
        ReportSource::LocalFallback => output.push_str("(local assessment, no API key set)\n"),
    }
    output.push('\n');

    if !report.analysis.is_empty() {
        output.push_str(&format!("{}\n\n", report.analysis));
    }

    if !report.strengths.is_empty() {
        output.push_str("Strengths:\n");
        for strength in &report.strengths {
            output.push_str(&format!("  + {strength}\n"));
        }
        output.push('\n');
    }

    if !report.concerns.is_empty() {
        output.push_str("Concerns:\n");
        for concern in &report.concerns {
            output.push_str(&format!("  - {concern}\n"));
        }
        output.push('\n');
    }

    if !report.recommendations.is_empty() {
        output.push_str("Recommendations:\n");
        for rec in &report.recommendations {
            output.push_str(&format!("  [{}] {}\n", rec.priority, rec.title));
            if !rec.description.is_empty() {
                output.push_str(&format!("        {}\n", rec.description));
            }
        }
    }

    output
}
