//! Transaction service domain logic.
//!
//! Creating an expense runs the overspend pre-check against the month the
//! expense is dated in, before the row is inserted. The check is advisory: the
//! transaction is stored whatever the outcome.

use anyhow::Result;
use chrono::Local;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::budget_statistics::{BudgetStatisticsService, OverspendCheck};
use crate::domain::commands::transactions::{
    CreateTransactionCommand, CreateTransactionResult, TransactionListQuery, UpdateTransactionCommand,
};
use crate::domain::models::{NewTransaction, Period, Transaction, TransactionError, TransactionKind};
use crate::storage::{Connection, TransactionStorage};

#[derive(Clone)]
pub struct TransactionService<C: Connection> {
    transaction_repository: C::TransactionRepository,
    statistics: BudgetStatisticsService<C>,
}

impl<C: Connection> TransactionService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let transaction_repository = connection.create_transaction_repository();
        let statistics = BudgetStatisticsService::new(connection);
        Self {
            transaction_repository,
            statistics,
        }
    }

    /// Validate and store a transaction, reporting whether it overspends its budget
    pub async fn create_transaction(&self, command: CreateTransactionCommand) -> Result<CreateTransactionResult> {
        info!("Creating transaction: {:?}", command);

        let new_transaction = Self::to_new_transaction(command);
        if let Err(e) = new_transaction.validate() {
            warn!("Rejected transaction: {}", e);
            return Err(e.into());
        }

        let overspend = match new_transaction.kind {
            TransactionKind::Expense => {
                let period = Period::containing(new_transaction.date)?;
                self.statistics
                    .check_overspend(&new_transaction.category, &period, new_transaction.amount)
                    .await?
            }
            TransactionKind::Income => OverspendCheck::not_applicable(),
        };

        let transaction = self.transaction_repository.store_transaction(&new_transaction).await?;
        info!(
            "Stored transaction {} ({} {} in '{}')",
            transaction.id,
            transaction.kind.as_str(),
            transaction.amount,
            transaction.category
        );

        Ok(CreateTransactionResult { transaction, overspend })
    }

    pub async fn get_transaction(&self, transaction_id: i64) -> Result<Transaction> {
        self.transaction_repository
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| TransactionError::NotFound(transaction_id).into())
    }

    pub async fn list_transactions(&self, query: TransactionListQuery) -> Result<Vec<Transaction>> {
        info!("Listing transactions with query: {:?}", query);
        self.transaction_repository.list_transactions(&query).await
    }

    /// Every transaction, oldest first
    pub async fn list_all_chronological(&self) -> Result<Vec<Transaction>> {
        self.transaction_repository.list_transactions_chronological().await
    }

    /// Replace every field of an existing transaction.
    ///
    /// Updates do not re-run the overspend check.
    pub async fn update_transaction(&self, command: UpdateTransactionCommand) -> Result<Transaction> {
        info!("Updating transaction {}", command.transaction_id);

        let new_transaction = Self::to_new_transaction(command.replacement);
        if let Err(e) = new_transaction.validate() {
            warn!("Rejected update of transaction {}: {}", command.transaction_id, e);
            return Err(e.into());
        }

        let transaction = new_transaction.with_id(command.transaction_id);
        if !self.transaction_repository.update_transaction(&transaction).await? {
            return Err(TransactionError::NotFound(command.transaction_id).into());
        }

        Ok(transaction)
    }

    pub async fn delete_transaction(&self, transaction_id: i64) -> Result<()> {
        info!("Deleting transaction {}", transaction_id);

        if !self.transaction_repository.delete_transaction(transaction_id).await? {
            return Err(TransactionError::NotFound(transaction_id).into());
        }
        Ok(())
    }

    fn to_new_transaction(command: CreateTransactionCommand) -> NewTransaction {
        NewTransaction {
            amount: command.amount,
            label: command.label,
            kind: command.kind,
            category: command.category,
            date: command.date.unwrap_or_else(|| Local::now().date_naive()),
        }
    }
}
