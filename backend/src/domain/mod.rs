//! # Domain Module
//!
//! Business logic of the budget tracker, independent of HTTP and of the
//! storage engine.
//!
//! - [`budget_statistics`]: monthly totals, remaining amount, percent consumed
//!   and the overspend pre-check
//! - [`transaction_service`]: transaction CRUD, runs the pre-check on new expenses
//! - [`budget_service`]: budget CRUD with the per-period uniqueness rule
//! - [`export_service`]: CSV rendering of the transaction history
//!
//! Services depend on the storage traits only, so the REST layer wires them to
//! SQLite while tests can use in-memory fakes.

pub mod budget_service;
pub mod budget_statistics;
pub mod commands;
pub mod export_service;
pub mod models;
pub mod transaction_service;

pub use budget_service::BudgetService;
pub use budget_statistics::{BudgetStatistics, BudgetStatisticsService, OverspendCheck, StatisticsError};
pub use export_service::{CsvExport, ExportService};
pub use transaction_service::TransactionService;
