use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use std::str::FromStr;

use super::connection::DbConnection;
use crate::domain::commands::transactions::TransactionListQuery;
use crate::domain::models::{DateRange, NewTransaction, Transaction, TransactionKind};
use crate::storage::traits::TransactionStorage;

const SELECT_COLUMNS: &str = "SELECT id, amount, label, kind, category, date FROM transactions";

/// Repository for transaction operations
#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_transaction(row: &SqliteRow) -> Result<Transaction> {
        let amount_text: String = row.try_get("amount")?;
        let amount = Decimal::from_str(&amount_text)
            .map_err(|e| anyhow!("Invalid decimal amount '{}': {}", amount_text, e))?;

        let kind_text: String = row.try_get("kind")?;
        let kind = TransactionKind::parse(&kind_text)
            .ok_or_else(|| anyhow!("Invalid transaction kind '{}'", kind_text))?;

        Ok(Transaction {
            id: row.try_get("id")?,
            amount,
            label: row.try_get("label")?,
            kind,
            category: row.try_get("category")?,
            date: row.try_get::<NaiveDate, _>("date")?,
        })
    }

    fn rows_to_transactions(rows: &[SqliteRow]) -> Result<Vec<Transaction>> {
        rows.iter().map(Self::row_to_transaction).collect()
    }
}

#[async_trait]
impl TransactionStorage for TransactionRepository {
    async fn store_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (amount, label, kind, category, date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction.amount.to_string())
        .bind(&transaction.label)
        .bind(transaction.kind.as_str())
        .bind(&transaction.category)
        .bind(transaction.date)
        .execute(self.db.pool())
        .await?;

        Ok(transaction.clone().with_id(result.last_insert_rowid()))
    }

    async fn get_transaction(&self, transaction_id: i64) -> Result<Option<Transaction>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(transaction_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::row_to_transaction).transpose()
    }

    async fn list_transactions(&self, query: &TransactionListQuery) -> Result<Vec<Transaction>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_COLUMNS);
        builder.push(" WHERE 1 = 1");

        if let Some(category) = &query.category {
            builder.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(start_date) = query.start_date {
            builder.push(" AND date >= ").push_bind(start_date);
        }
        if let Some(end_date) = query.end_date {
            builder.push(" AND date <= ").push_bind(end_date);
        }
        builder.push(" ORDER BY date DESC, id DESC");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        Self::rows_to_transactions(&rows)
    }

    async fn list_transactions_chronological(&self) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(&format!("{} ORDER BY date ASC, id ASC", SELECT_COLUMNS))
            .fetch_all(self.db.pool())
            .await?;
        Self::rows_to_transactions(&rows)
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET amount = ?, label = ?, kind = ?, category = ?, date = ?
            WHERE id = ?
            "#,
        )
        .bind(transaction.amount.to_string())
        .bind(&transaction.label)
        .bind(transaction.kind.as_str())
        .bind(&transaction.category)
        .bind(transaction.date)
        .bind(transaction.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_transaction(&self, transaction_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(transaction_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_expenses_in_range(&self, category: &str, range: &DateRange) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(&format!(
            "{} WHERE category = ? AND kind = 'expense' AND date >= ? AND date < ? ORDER BY date ASC, id ASC",
            SELECT_COLUMNS
        ))
        .bind(category)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(self.db.pool())
        .await?;

        Self::rows_to_transactions(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Period;
    use rust_decimal_macros::dec;

    async fn setup_test() -> TransactionRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        TransactionRepository::new(db)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_transaction(amount: Decimal, kind: TransactionKind, category: &str, date: NaiveDate) -> NewTransaction {
        NewTransaction {
            amount,
            label: format!("{} {}", category, amount),
            kind,
            category: category.to_string(),
            date,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_transaction() {
        let repo = setup_test().await;

        let stored = repo
            .store_transaction(&new_transaction(dec!(25.50), TransactionKind::Expense, "alimentation", date(2026, 1, 6)))
            .await
            .unwrap();

        let fetched = repo.get_transaction(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.amount, dec!(25.50));
        assert_eq!(fetched.date, date(2026, 1, 6));
    }

    #[tokio::test]
    async fn test_get_missing_transaction() {
        let repo = setup_test().await;
        assert!(repo.get_transaction(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_ordering() {
        let repo = setup_test().await;
        repo.store_transaction(&new_transaction(dec!(25.50), TransactionKind::Expense, "alimentation", date(2026, 1, 6)))
            .await
            .unwrap();
        repo.store_transaction(&new_transaction(dec!(800), TransactionKind::Expense, "logement", date(2026, 1, 1)))
            .await
            .unwrap();
        repo.store_transaction(&new_transaction(dec!(50), TransactionKind::Expense, "alimentation", date(2026, 2, 10)))
            .await
            .unwrap();

        let all = repo.list_transactions(&TransactionListQuery::default()).await.unwrap();
        let dates: Vec<NaiveDate> = all.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date(2026, 2, 10), date(2026, 1, 6), date(2026, 1, 1)]);

        let by_category = repo
            .list_transactions(&TransactionListQuery {
                category: Some("alimentation".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_category.len(), 2);

        // end_date is inclusive
        let january = repo
            .list_transactions(&TransactionListQuery {
                category: None,
                start_date: Some(date(2026, 1, 1)),
                end_date: Some(date(2026, 1, 31)),
            })
            .await
            .unwrap();
        assert_eq!(january.len(), 2);
        assert!(january.iter().all(|t| t.date.format("%Y-%m").to_string() == "2026-01"));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = setup_test().await;
        let mut stored = repo
            .store_transaction(&new_transaction(dec!(25.50), TransactionKind::Expense, "alimentation", date(2026, 1, 6)))
            .await
            .unwrap();

        stored.amount = dec!(30);
        stored.label = "Groceries (edited)".to_string();
        assert!(repo.update_transaction(&stored).await.unwrap());
        assert_eq!(repo.get_transaction(stored.id).await.unwrap().unwrap(), stored);

        assert!(repo.delete_transaction(stored.id).await.unwrap());
        assert!(!repo.delete_transaction(stored.id).await.unwrap());
        stored.id = 4242;
        assert!(!repo.update_transaction(&stored).await.unwrap());
    }

    #[tokio::test]
    async fn test_expenses_in_range_excludes_income_other_categories_and_adjacent_months() {
        let repo = setup_test().await;
        let entries = [
            (dec!(10), TransactionKind::Expense, "alimentation", date(2026, 1, 1)),
            (dec!(20), TransactionKind::Expense, "alimentation", date(2026, 1, 31)),
            (dec!(2000), TransactionKind::Income, "alimentation", date(2026, 1, 15)),
            (dec!(40), TransactionKind::Expense, "logement", date(2026, 1, 15)),
            (dec!(80), TransactionKind::Expense, "alimentation", date(2025, 12, 31)),
            (dec!(160), TransactionKind::Expense, "alimentation", date(2026, 2, 1)),
        ];
        for (amount, kind, category, day) in entries {
            repo.store_transaction(&new_transaction(amount, kind, category, day)).await.unwrap();
        }

        let range = Period::new(1, 2026).unwrap().date_range();
        let expenses = repo.list_expenses_in_range("alimentation", &range).await.unwrap();
        let amounts: Vec<Decimal> = expenses.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![dec!(10), dec!(20)]);
    }
}
