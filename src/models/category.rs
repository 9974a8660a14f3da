//! Expense categories
//!
//! Expenses are always assigned to one of a fixed set of twelve categories.
//! The names are part of the on-disk schema and the CSV export format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Gifts & Donations")]
    GiftsAndDonations,
    #[serde(rename = "Housing")]
    Housing,
    #[serde(rename = "Other")]
    Other,
}

impl ExpenseCategory {
    /// All categories, in canonical display order
    pub const ALL: [ExpenseCategory; 12] = [
        Self::FoodAndDining,
        Self::Transportation,
        Self::Shopping,
        Self::BillsAndUtilities,
        Self::Entertainment,
        Self::Healthcare,
        Self::Education,
        Self::Travel,
        Self::PersonalCare,
        Self::GiftsAndDonations,
        Self::Housing,
        Self::Other,
    ];

    /// The canonical display name, also used on disk and in CSV exports
    pub fn name(&self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::BillsAndUtilities => "Bills & Utilities",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::PersonalCare => "Personal Care",
            Self::GiftsAndDonations => "Gifts & Donations",
            Self::Housing => "Housing",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExpenseCategory {
    type Err = CategoryParseError;

    /// Parse a category by display name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Error for unrecognized category names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown expense category: {}", self.0)
    }
}

impl std::error::Error for CategoryParseError {}
