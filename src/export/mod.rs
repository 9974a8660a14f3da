//! Data export
//!
//! CSV export of a user's ledger, suitable for spreadsheets.

pub mod csv;

pub use csv::{export_transactions_csv, write_transactions_csv};
