use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use std::str::FromStr;

use super::connection::DbConnection;
use crate::domain::commands::budgets::BudgetListQuery;
use crate::domain::models::{Budget, BudgetError, NewBudget};
use crate::storage::traits::BudgetStorage;

const SELECT_COLUMNS: &str = "SELECT id, category, cap_amount, month, year FROM budgets";

/// Repository for budget operations
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_budget(row: &SqliteRow) -> Result<Budget> {
        let cap_text: String = row.try_get("cap_amount")?;
        let cap_amount = Decimal::from_str(&cap_text)
            .map_err(|e| anyhow!("Invalid decimal cap amount '{}': {}", cap_text, e))?;

        Ok(Budget {
            id: row.try_get("id")?,
            category: row.try_get("category")?,
            cap_amount,
            month: row.try_get::<u32, _>("month")?,
            year: row.try_get::<i32, _>("year")?,
        })
    }
}

/// A UNIQUE(category, month, year) violation surfaces as [`BudgetError::Duplicate`]
fn map_write_error(err: sqlx::Error, category: &str, month: u32, year: i32) -> anyhow::Error {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => BudgetError::Duplicate {
            category: category.to_string(),
            month,
            year,
        }
        .into(),
        _ => err.into(),
    }
}

#[async_trait]
impl BudgetStorage for BudgetRepository {
    async fn store_budget(&self, budget: &NewBudget) -> Result<Budget> {
        let result = sqlx::query(
            r#"
            INSERT INTO budgets (category, cap_amount, month, year)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&budget.category)
        .bind(budget.cap_amount.to_string())
        .bind(budget.month)
        .bind(budget.year)
        .execute(self.db.pool())
        .await
        .map_err(|e| map_write_error(e, &budget.category, budget.month, budget.year))?;

        Ok(budget.clone().with_id(result.last_insert_rowid()))
    }

    async fn get_budget(&self, budget_id: i64) -> Result<Option<Budget>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(budget_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_budget).transpose()
    }

    async fn find_budget(&self, category: &str, month: u32, year: i32) -> Result<Option<Budget>> {
        let row = sqlx::query(&format!(
            "{} WHERE category = ? AND month = ? AND year = ?",
            SELECT_COLUMNS
        ))
        .bind(category)
        .bind(month)
        .bind(year)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_budget).transpose()
    }

    async fn list_budgets(&self, query: &BudgetListQuery) -> Result<Vec<Budget>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_COLUMNS);
        builder.push(" WHERE 1 = 1");

        if let Some(category) = &query.category {
            builder.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(month) = query.month {
            builder.push(" AND month = ").push_bind(month);
        }
        if let Some(year) = query.year {
            builder.push(" AND year = ").push_bind(year);
        }
        builder.push(" ORDER BY year DESC, month DESC, category ASC");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::row_to_budget).collect()
    }

    async fn update_budget(&self, budget: &Budget) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE budgets
            SET category = ?, cap_amount = ?, month = ?, year = ?
            WHERE id = ?
            "#,
        )
        .bind(&budget.category)
        .bind(budget.cap_amount.to_string())
        .bind(budget.month)
        .bind(budget.year)
        .bind(budget.id)
        .execute(self.db.pool())
        .await
        .map_err(|e| map_write_error(e, &budget.category, budget.month, budget.year))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_budget(&self, budget_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = ?")
            .bind(budget_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
