//! spendlog - Personal expense tracking from the command line
//!
//! This library provides the core functionality for the spendlog expense
//! tracker: multi-user accounts backed by JSON files, per-user transaction
//! ledgers, monthly and yearly reporting, CSV export, and an optional
//! model-assisted financial health assessment.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management for the on-disk data layout
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, money, categories)
//! - `storage`: JSON file storage layer
//! - `session`: Authenticated session tokens
//! - `services`: Business logic layer (auth, ledger, reports)
//! - `insight`: Financial health scoring, local and model-backed
//! - `export`: CSV export
//! - `display`: Terminal output formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use spendlog::config::AppPaths;
//! use spendlog::storage::Storage;
//!
//! let paths = AppPaths::new()?;
//! let storage = Storage::new(paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod insight;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{SpendlogError, SpendlogResult};
