//! Report CLI commands
//!
//! Monthly and yearly summaries, plus the financial health assessment.

use chrono::Utc;
use clap::Subcommand;

use crate::display::{format_health_report, format_monthly_summary, format_yearly_summary};
use crate::error::SpendlogResult;
use crate::insight::HealthAnalyzer;
use crate::services::{LedgerFilter, LedgerService, ReportService};
use crate::session::Session;
use crate::storage::Storage;

use super::transaction::{current_period, parse_period};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Summarize one month (defaults to the current month)
    Month {
        /// Month to summarize (YYYY-MM)
        period: Option<String>,
    },

    /// Summarize one year (defaults to the current year)
    Year {
        /// Year to summarize
        year: Option<i32>,
    },

    /// List the years with any recorded activity
    Years,
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    session: &Session,
    cmd: ReportCommands,
) -> SpendlogResult<()> {
    let service = ReportService::new(storage);

    match cmd {
        ReportCommands::Month { period } => {
            let (year, month) = match period {
                Some(p) => parse_period(&p)?,
                None => current_period(),
            };
            let summary = service.monthly_summary(session, year, month)?;
            print!("{}", format_monthly_summary(&summary));
        }

        ReportCommands::Year { year } => {
            let year = year.unwrap_or_else(|| current_period().0);
            let summary = service.yearly_summary(session, year)?;
            print!("{}", format_yearly_summary(&summary));
        }

        ReportCommands::Years => {
            for year in service.all_years(session)? {
                println!("{year}");
            }
        }
    }

    Ok(())
}

/// Handle the health command
pub fn handle_health(storage: &Storage, session: &Session) -> SpendlogResult<()> {
    let transactions = LedgerService::new(storage).list(session, LedgerFilter::new())?;

    let analyzer = HealthAnalyzer::from_env();
    if analyzer.has_model() {
        println!("Requesting assessment from the hosted model...");
    }

    let report = analyzer.generate_report(&transactions, Utc::now().date_naive());
    print!("{}", format_health_report(&report));
    Ok(())
}
