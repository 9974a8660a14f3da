//! Business logic layer

pub mod auth;
pub mod ledger;
pub mod report;

pub use auth::{AuthService, ProfileUpdate, RegisterInput};
pub use ledger::{AddExpenseInput, AddIncomeInput, LedgerFilter, LedgerService};
pub use report::{MonthlySummary, ReportService, YearlySummary};
