//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.

pub mod report;
pub mod transaction;

pub use report::{format_health_report, format_monthly_summary, format_yearly_summary};
pub use transaction::{
    format_transaction_details, format_transaction_register, format_transaction_row,
};
