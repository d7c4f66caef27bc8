//! SQLite storage backend built on sqlx.

pub mod budget_repository;
pub mod connection;
pub mod transaction_repository;

pub use budget_repository::BudgetRepository;
pub use connection::DbConnection;
pub use transaction_repository::TransactionRepository;
