//! Financial health insight
//!
//! Produces a scored assessment of a user's finances. When a Together.ai API
//! key is configured the assessment comes from a hosted model; otherwise, or
//! whenever the model path fails for any reason, a local rule-based scorer
//! takes over. Generating a report never fails and never blocks on the
//! network without a key.
//!
//! Only aggregate figures leave the machine; raw transactions are never sent.

pub mod client;
pub mod metrics;
pub mod score;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Money, Transaction};

pub use client::InsightClient;
pub use metrics::{FinancialMetrics, IncomeConsistency, MonthlyFigures, SpendingTrend};
pub use score::{HealthReport, Priority, Recommendation, ReportSource};

/// Aggregate snapshot sent to the model; amounts in whole currency units
#[derive(Serialize)]
struct FinancialSnapshot {
    current_month_income: f64,
    current_month_expenses: f64,
    savings_rate_percent: f64,
    avg_monthly_income: f64,
    avg_monthly_expenses: f64,
    total_income: f64,
    total_expenses: f64,
    spending_trend: SpendingTrend,
    income_consistency: IncomeConsistency,
    expenses_by_category: BTreeMap<String, f64>,
    monthly_breakdown: Vec<SnapshotMonth>,
    income_entries: usize,
    expense_entries: usize,
}

#[derive(Serialize)]
struct SnapshotMonth {
    year: i32,
    month: u32,
    income: f64,
    expenses: f64,
}

/// The structured assessment the model is asked to return
#[derive(Deserialize)]
struct ModelAssessment {
    score: Option<f64>,
    #[serde(default)]
    score_explanation: String,
    #[serde(default)]
    analysis: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    concerns: Vec<String>,
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

const SYSTEM_PROMPT: &str = "You are a personal finance advisor. You are given \
aggregate financial metrics for one person and must assess their financial \
health. Respond with a single JSON object with these fields: \"score\" (number \
0-100), \"score_explanation\" (string), \"analysis\" (string, 2-4 sentences), \
\"strengths\" (array of strings), \"concerns\" (array of strings), and \
\"recommendations\" (array of objects with \"priority\" of \"high\", \"medium\" \
or \"low\", \"title\" and \"description\"). Respond with JSON only.";

/// Produces health reports, preferring the hosted model when available
pub struct HealthAnalyzer {
    client: Option<InsightClient>,
}

impl HealthAnalyzer {
    /// Create an analyzer with an explicit client (or none)
    pub fn new(client: Option<InsightClient>) -> Self {
        Self { client }
    }

    /// Create an analyzer from the environment; no key means local-only
    pub fn from_env() -> Self {
        Self::new(InsightClient::from_env())
    }

    /// Whether the hosted model path is configured
    pub fn has_model(&self) -> bool {
        self.client.is_some()
    }

    /// Generate a health report for a ledger, relative to the given date
    ///
    /// This is infallible: any failure on the model path degrades to the
    /// local rule-based report.
    pub fn generate_report(&self, transactions: &[Transaction], today: NaiveDate) -> HealthReport {
        let metrics = FinancialMetrics::compute(transactions, today);

        match &self.client {
            Some(client) => match model_report(client, &metrics) {
                Ok(report) => report,
                Err(_) => score::local_report(metrics),
            },
            None => score::local_report(metrics),
        }
    }
}

fn model_report(
    client: &InsightClient,
    metrics: &FinancialMetrics,
) -> crate::error::SpendlogResult<HealthReport> {
    let snapshot = snapshot_of(metrics);
    let user_prompt = format!(
        "Assess the financial health of a person with these metrics:\n{}",
        serde_json::to_string_pretty(&snapshot)?
    );

    let reply = client.chat(SYSTEM_PROMPT, &user_prompt)?;
    Ok(parse_model_reply(&reply, metrics.clone()))
}

/// Turn a model reply into a report. An unparseable reply still yields a
/// usable report: default score, raw text preserved as the analysis.
fn parse_model_reply(reply: &str, metrics: FinancialMetrics) -> HealthReport {
    let payload = client::extract_json_block(reply);

    match serde_json::from_str::<ModelAssessment>(payload) {
        Ok(assessment) => HealthReport {
            score: score::clamp_score(assessment.score.unwrap_or(f64::from(
                score::DEFAULT_MODEL_SCORE,
            )) as i64),
            score_explanation: assessment.score_explanation,
            analysis: assessment.analysis,
            strengths: assessment.strengths,
            concerns: assessment.concerns,
            recommendations: assessment.recommendations,
            source: ReportSource::Model,
            metrics,
        },
        Err(_) => HealthReport {
            score: score::DEFAULT_MODEL_SCORE,
            score_explanation: "The model reply could not be parsed as JSON".to_string(),
            analysis: reply.trim().to_string(),
            strengths: Vec::new(),
            concerns: Vec::new(),
            recommendations: Vec::new(),
            source: ReportSource::Model,
            metrics,
        },
    }
}

fn snapshot_of(metrics: &FinancialMetrics) -> FinancialSnapshot {
    FinancialSnapshot {
        current_month_income: units(metrics.current_month_income),
        current_month_expenses: units(metrics.current_month_expenses),
        savings_rate_percent: metrics.savings_rate,
        avg_monthly_income: units(metrics.avg_monthly_income),
        avg_monthly_expenses: units(metrics.avg_monthly_expenses),
        total_income: units(metrics.total_income),
        total_expenses: units(metrics.total_expenses),
        spending_trend: metrics.spending_trend,
        income_consistency: metrics.income_consistency,
        expenses_by_category: metrics
            .expenses_by_category
            .iter()
            .map(|(category, total)| (category.name().to_string(), units(*total)))
            .collect(),
        monthly_breakdown: metrics
            .monthly
            .iter()
            .map(|m| SnapshotMonth {
                year: m.year,
                month: m.month,
                income: units(m.income),
                expenses: units(m.expenses),
            })
            .collect(),
        income_entries: metrics.income_count,
        expense_entries: metrics.expense_count,
    }
}

fn units(amount: Money) -> f64 {
    amount.cents() as f64 / 100.0
}
