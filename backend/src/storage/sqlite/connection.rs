use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use super::{BudgetRepository, TransactionRepository};
use crate::domain::models::{Budget, DateRange};
use crate::storage::traits::{BudgetStorage, Connection, SpendingSource, TransactionStorage};

/// DbConnection manages the SQLite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection, creating the database file if needed
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Amounts are stored as TEXT to keep exact decimal values
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount TEXT NOT NULL,
                label TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_category_date
            ON transactions(category, date);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                cap_amount TEXT NOT NULL,
                month INTEGER NOT NULL CHECK (month >= 1 AND month <= 12),
                year INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (category, month, year)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_budgets_period
            ON budgets(year, month);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type TransactionRepository = TransactionRepository;
    type BudgetRepository = BudgetRepository;

    fn create_transaction_repository(&self) -> Self::TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    fn create_budget_repository(&self) -> Self::BudgetRepository {
        BudgetRepository::new(self.clone())
    }
}

#[async_trait]
impl SpendingSource for DbConnection {
    async fn find_expense_total(&self, category: &str, range: &DateRange) -> Result<Decimal> {
        let expenses = self
            .create_transaction_repository()
            .list_expenses_in_range(category, range)
            .await?;
        expenses
            .iter()
            .try_fold(Decimal::ZERO, |total, t| total.checked_add(t.amount))
            .ok_or_else(|| anyhow!("Expense total for '{}' does not fit a decimal", category))
    }

    async fn find_budget(&self, category: &str, month: u32, year: i32) -> Result<Option<Budget>> {
        self.create_budget_repository()
            .find_budget(category, month, year)
            .await
    }
}
