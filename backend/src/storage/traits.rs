//! # Storage Traits
//!
//! Storage abstractions used by the domain layer, so services can run against
//! SQLite in production and against lightweight fakes in tests.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::commands::budgets::BudgetListQuery;
use crate::domain::commands::transactions::TransactionListQuery;
use crate::domain::models::{Budget, DateRange, NewBudget, NewTransaction, Transaction};

/// Trait defining the interface for transaction storage operations
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    /// Insert a new transaction and return it with its assigned id
    async fn store_transaction(&self, transaction: &NewTransaction) -> Result<Transaction>;

    async fn get_transaction(&self, transaction_id: i64) -> Result<Option<Transaction>>;

    /// List transactions matching the filters, most recent date first
    async fn list_transactions(&self, query: &TransactionListQuery) -> Result<Vec<Transaction>>;

    /// List every transaction in chronological order (oldest first)
    async fn list_transactions_chronological(&self) -> Result<Vec<Transaction>>;

    /// Replace every field of an existing transaction.
    /// Returns false if no transaction has this id.
    async fn update_transaction(&self, transaction: &Transaction) -> Result<bool>;

    /// Returns true if the transaction was found and deleted
    async fn delete_transaction(&self, transaction_id: i64) -> Result<bool>;

    /// Expense transactions of one category whose date lies in the half-open range
    async fn list_expenses_in_range(&self, category: &str, range: &DateRange) -> Result<Vec<Transaction>>;
}

/// Trait defining the interface for budget storage operations
#[async_trait]
pub trait BudgetStorage: Send + Sync {
    /// Insert a new budget and return it with its assigned id
    async fn store_budget(&self, budget: &NewBudget) -> Result<Budget>;

    async fn get_budget(&self, budget_id: i64) -> Result<Option<Budget>>;

    /// Exact lookup on the (category, month, year) triple
    async fn find_budget(&self, category: &str, month: u32, year: i32) -> Result<Option<Budget>>;

    /// List budgets matching the filters, most recent period first
    async fn list_budgets(&self, query: &BudgetListQuery) -> Result<Vec<Budget>>;

    /// Returns false if no budget has this id
    async fn update_budget(&self, budget: &Budget) -> Result<bool>;

    /// Returns true if the budget was found and deleted
    async fn delete_budget(&self, budget_id: i64) -> Result<bool>;
}

/// Read-only capability consumed by the budget statistics engine.
///
/// Lookup misses are not errors: no budget is `None` and no expense is zero.
#[async_trait]
pub trait SpendingSource: Send + Sync {
    /// Sum of expense amounts for the category within the half-open range
    async fn find_expense_total(&self, category: &str, range: &DateRange) -> Result<Decimal>;

    async fn find_budget(&self, category: &str, month: u32, year: i32) -> Result<Option<Budget>>;
}

/// Trait defining the interface for storage connections.
///
/// Provides factory methods for repositories and the read capability used by
/// the statistics engine, so domain services only depend on this trait.
pub trait Connection: SpendingSource + Clone + 'static {
    type TransactionRepository: TransactionStorage + Clone;
    type BudgetRepository: BudgetStorage + Clone;

    fn create_transaction_repository(&self) -> Self::TransactionRepository;

    fn create_budget_repository(&self) -> Self::BudgetRepository;
}
