//! CLI command handlers
//!
//! Each submodule owns the argument types and handler for one command family.

pub mod auth;
pub mod export;
pub mod report;
pub mod transaction;

pub use auth::{
    handle_passwd, handle_profile_command, handle_register, login, resolve_credentials,
    Credentials, ProfileCommands, RegisterArgs,
};
pub use export::{handle_export, ExportArgs};
pub use report::{handle_health, handle_report_command, ReportCommands};
pub use transaction::{
    handle_add_expense, handle_add_income, handle_delete, handle_list, AddExpenseArgs,
    AddIncomeArgs, ListArgs,
};
