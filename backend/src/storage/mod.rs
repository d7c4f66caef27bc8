//! # Storage Module
//!
//! Handles all data persistence for the budget tracker.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite backend in
//! [`sqlite`] is the production implementation. Transactions and budgets are
//! stored in two independent tables and are only related at query time, by
//! category and date.

pub mod sqlite;
pub mod traits;

pub use sqlite::{BudgetRepository, DbConnection, TransactionRepository};
pub use traits::{BudgetStorage, Connection, SpendingSource, TransactionStorage};
