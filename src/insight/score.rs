//! Financial health scoring
//!
//! The local rule-based score used whenever the hosted model is unavailable,
//! plus the report types shared with the model-backed path. Scores are always
//! clamped to 0-100 no matter where they came from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Money;

use super::metrics::{FinancialMetrics, IncomeConsistency, SpendingTrend};

/// Neutral baseline before any adjustments
const BASE_SCORE: i32 = 50;

/// Score used when a model reply cannot be parsed
pub const DEFAULT_MODEL_SCORE: u8 = 70;

/// How urgent a recommendation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

fn default_priority() -> Priority {
    Priority::Medium
}

/// A single actionable suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default = "default_priority")]
    pub priority: Priority,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Recommendation {
    pub fn new(priority: Priority, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            priority,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Where a report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    /// Produced by the hosted model
    Model,
    /// Produced by the local rule-based scorer
    LocalFallback,
}

/// A complete financial health assessment
#[derive(Debug, Clone)]
pub struct HealthReport {
    /// 0-100
    pub score: u8,
    pub score_explanation: String,
    pub analysis: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub source: ReportSource,
    pub metrics: FinancialMetrics,
}

/// Clamp an arbitrary model- or rule-produced score into 0-100
pub(crate) fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Build a health report from metrics alone, without any network access
pub fn local_report(metrics: FinancialMetrics) -> HealthReport {
    let score = clamp_score(i64::from(rule_score(&metrics)));

    HealthReport {
        score,
        score_explanation: format!(
            "Rule-based score from your savings rate ({:.1}%), spending trend ({}) \
             and income consistency ({})",
            metrics.savings_rate, metrics.spending_trend, metrics.income_consistency
        ),
        analysis: local_analysis(&metrics, score),
        strengths: local_strengths(&metrics),
        concerns: local_concerns(&metrics),
        recommendations: local_recommendations(&metrics),
        source: ReportSource::LocalFallback,
        metrics,
    }
}

/// Rule-based score: start at a neutral baseline and adjust for savings rate,
/// spending trend, income consistency, category coverage and history depth.
fn rule_score(metrics: &FinancialMetrics) -> i32 {
    let mut score = BASE_SCORE;

    if metrics.savings_rate >= 20.0 {
        score += 30;
    } else if metrics.savings_rate >= 10.0 {
        score += 20;
    } else if metrics.savings_rate > 0.0 {
        score += 10;
    } else if metrics.savings_rate < 0.0 {
        score -= 20;
    }

    score += match metrics.spending_trend {
        SpendingTrend::Decreasing => 20,
        SpendingTrend::Stable => 10,
        SpendingTrend::Increasing => -10,
    };

    score += match metrics.income_consistency {
        IncomeConsistency::Consistent => 20,
        IncomeConsistency::Stable => 10,
        IncomeConsistency::Variable => 0,
    };

    let categories = metrics.expenses_by_category.len();
    if categories >= 5 {
        score += 10;
    } else if categories >= 3 {
        score += 5;
    }

    let transactions = metrics.income_count + metrics.expense_count;
    if transactions >= 20 {
        score += 10;
    } else if transactions >= 10 {
        score += 5;
    }

    score
}

fn local_analysis(metrics: &FinancialMetrics, score: u8) -> String {
    let standing = match score {
        80..=100 => "in strong shape",
        60..=79 => "on a solid footing",
        40..=59 => "holding steady but with room to improve",
        _ => "under strain",
    };
    format!(
        "Your finances look {standing}. This month you brought in {} and spent {}, \
         a savings rate of {:.1}%. Spending is {} month over month and your income \
         has been {}.",
        metrics.current_month_income,
        metrics.current_month_expenses,
        metrics.savings_rate,
        metrics.spending_trend,
        metrics.income_consistency
    )
}

fn local_strengths(metrics: &FinancialMetrics) -> Vec<String> {
    let mut strengths = Vec::new();

    if metrics.savings_rate >= 20.0 {
        strengths.push(format!(
            "Excellent savings rate of {:.1}% this month",
            metrics.savings_rate
        ));
    } else if metrics.savings_rate >= 10.0 {
        strengths.push(format!(
            "Healthy savings rate of {:.1}% this month",
            metrics.savings_rate
        ));
    }

    if metrics.spending_trend == SpendingTrend::Decreasing {
        strengths.push("Spending is trending down compared to last month".to_string());
    }
    if metrics.income_consistency == IncomeConsistency::Consistent {
        strengths.push("Income has been very consistent".to_string());
    }
    if metrics.expenses_by_category.len() >= 5 {
        strengths.push("Expenses are tracked across a good range of categories".to_string());
    }

    strengths
}

fn local_concerns(metrics: &FinancialMetrics) -> Vec<String> {
    let mut concerns = Vec::new();

    if metrics.savings_rate < 0.0 {
        concerns.push("You spent more than you earned this month".to_string());
    } else if metrics.savings_rate < 10.0 {
        concerns.push(format!(
            "Savings rate of {:.1}% is below the 10% mark",
            metrics.savings_rate
        ));
    }

    if metrics.spending_trend == SpendingTrend::Increasing {
        concerns.push("Spending rose more than 10% over last month".to_string());
    }
    if metrics.income_consistency == IncomeConsistency::Variable {
        concerns.push("Income has varied a lot month to month".to_string());
    }
    if metrics.income_count + metrics.expense_count < 10 {
        concerns.push("Not much history yet; the picture will sharpen as you log more".to_string());
    }

    concerns
}

fn local_recommendations(metrics: &FinancialMetrics) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if metrics.savings_rate < 10.0 {
        recommendations.push(Recommendation::new(
            Priority::High,
            "Raise your savings rate",
            "Aim to keep at least 10-20% of monthly income unspent. Start by \
             trimming the largest discretionary category.",
        ));
    }

    if metrics.spending_trend == SpendingTrend::Increasing {
        recommendations.push(Recommendation::new(
            Priority::High,
            "Rein in this month's spending",
            "Expenses are up more than 10% on last month. Compare the two months \
             category by category to find the jump.",
        ));
    }

    // A single category close to the whole monthly average deserves a look.
    if let Some((category, total)) = metrics
        .expenses_by_category
        .iter()
        .max_by_key(|(_, total)| **total)
    {
        let threshold = Money::from_cents(
            (metrics.avg_monthly_expenses.cents() as f64 * 0.9) as i64,
        );
        if total > &threshold && !total.is_zero() {
            recommendations.push(Recommendation::new(
                Priority::Medium,
                format!("Review spending on {category}"),
                format!("{category} accounts for {total} over the last three months, \
                         your biggest category by far."),
            ));
        }
    }

    if metrics.expenses_by_category.len() < 3 && metrics.expense_count > 0 {
        recommendations.push(Recommendation::new(
            Priority::Low,
            "Categorize more of your spending",
            "Most expenses fall into very few categories. Finer categories make \
             trends and reports far more useful.",
        ));
    }

    if metrics.income_consistency == IncomeConsistency::Variable {
        recommendations.push(Recommendation::new(
            Priority::Medium,
            "Build a buffer for variable income",
            "With income swinging month to month, an emergency fund of 3-6 months \
             of expenses smooths the dips.",
        ));
    }

    recommendations
}
