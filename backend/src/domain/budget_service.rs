//! Budget service domain logic.
//!
//! Owns budget CRUD and the one-budget-per-(category, month, year) rule, and
//! exposes the statistics engine for stored budgets.

use anyhow::Result;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::budget_statistics::{BudgetStatistics, BudgetStatisticsService, OverspendCheck};
use crate::domain::commands::budgets::{BudgetListQuery, CreateBudgetCommand, UpdateBudgetCommand};
use crate::domain::models::{
    Budget, BudgetError, BudgetValidationError, NewBudget, Period, TransactionValidationError, MAX_AMOUNT,
    MAX_BUDGET_YEAR, MIN_BUDGET_YEAR,
};
use crate::storage::{BudgetStorage, Connection};

#[derive(Clone)]
pub struct BudgetService<C: Connection> {
    budget_repository: C::BudgetRepository,
    statistics: BudgetStatisticsService<C>,
}

impl<C: Connection> BudgetService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let budget_repository = connection.create_budget_repository();
        let statistics = BudgetStatisticsService::new(connection);
        Self {
            budget_repository,
            statistics,
        }
    }

    pub async fn create_budget(&self, command: CreateBudgetCommand) -> Result<Budget> {
        info!("Creating budget: {:?}", command);

        let new_budget = NewBudget {
            category: command.category,
            cap_amount: command.cap_amount,
            month: command.month,
            year: command.year,
        };
        if let Err(e) = new_budget.validate() {
            warn!("Rejected budget: {}", e);
            return Err(e.into());
        }

        self.ensure_unique(&new_budget, None).await?;

        let budget = self.budget_repository.store_budget(&new_budget).await?;
        info!("Stored budget {} for '{}' in {:02}/{}", budget.id, budget.category, budget.month, budget.year);
        Ok(budget)
    }

    pub async fn get_budget(&self, budget_id: i64) -> Result<Budget> {
        self.budget_repository
            .get_budget(budget_id)
            .await?
            .ok_or_else(|| BudgetError::NotFound(budget_id).into())
    }

    pub async fn list_budgets(&self, query: BudgetListQuery) -> Result<Vec<Budget>> {
        info!("Listing budgets with query: {:?}", query);
        if let Some(month) = query.month.filter(|m| !(1..=12).contains(m)) {
            return Err(BudgetValidationError::InvalidMonth(month).into());
        }
        if let Some(year) = query.year.filter(|y| !(MIN_BUDGET_YEAR..=MAX_BUDGET_YEAR).contains(y)) {
            return Err(BudgetValidationError::InvalidYear(year).into());
        }
        self.budget_repository.list_budgets(&query).await
    }

    /// Merge the provided fields into the stored budget, then re-validate
    pub async fn update_budget(&self, command: UpdateBudgetCommand) -> Result<Budget> {
        info!("Updating budget: {:?}", command);

        let existing = self.get_budget(command.budget_id).await?;
        let merged = NewBudget {
            category: command.category.unwrap_or(existing.category),
            cap_amount: command.cap_amount.unwrap_or(existing.cap_amount),
            month: command.month.unwrap_or(existing.month),
            year: command.year.unwrap_or(existing.year),
        };
        if let Err(e) = merged.validate() {
            warn!("Rejected update of budget {}: {}", command.budget_id, e);
            return Err(e.into());
        }

        self.ensure_unique(&merged, Some(command.budget_id)).await?;

        let budget = merged.with_id(command.budget_id);
        if !self.budget_repository.update_budget(&budget).await? {
            return Err(BudgetError::NotFound(command.budget_id).into());
        }
        Ok(budget)
    }

    pub async fn delete_budget(&self, budget_id: i64) -> Result<()> {
        info!("Deleting budget {}", budget_id);

        if !self.budget_repository.delete_budget(budget_id).await? {
            return Err(BudgetError::NotFound(budget_id).into());
        }
        Ok(())
    }

    /// Statistics for one category, zeros when it has no budget that month
    pub async fn statistics_for_category(&self, category: &str, month: u32, year: i32) -> Result<BudgetStatistics> {
        let period = Period::for_budget(month, year)?;
        self.statistics.statistics_snapshot(category, &period).await
    }

    /// Statistics for every budget defined in the period, ordered by category
    pub async fn statistics_for_period(&self, month: u32, year: i32) -> Result<Vec<BudgetStatistics>> {
        let period = Period::for_budget(month, year)?;
        let mut budgets = self
            .budget_repository
            .list_budgets(&BudgetListQuery {
                category: None,
                month: Some(month),
                year: Some(year),
            })
            .await?;
        budgets.sort_by(|a, b| a.category.cmp(&b.category));

        let mut statistics = Vec::with_capacity(budgets.len());
        for budget in &budgets {
            statistics.push(self.statistics.statistics_snapshot(&budget.category, &period).await?);
        }
        Ok(statistics)
    }

    /// Overspend pre-check for a prospective expense, without storing anything
    pub async fn check_overspend(&self, category: &str, month: u32, year: i32, amount: Decimal) -> Result<OverspendCheck> {
        if amount <= Decimal::ZERO {
            return Err(TransactionValidationError::NonPositiveAmount.into());
        }
        if amount > MAX_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge.into());
        }
        if category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory.into());
        }

        let period = Period::for_budget(month, year)?;
        self.statistics.check_overspend(category, &period, amount).await
    }

    async fn ensure_unique(&self, budget: &NewBudget, updating: Option<i64>) -> Result<()> {
        let existing = self
            .budget_repository
            .find_budget(&budget.category, budget.month, budget.year)
            .await?;

        match existing {
            Some(other) if Some(other.id) != updating => {
                warn!(
                    "Budget for '{}' in {:02}/{} already exists (id {})",
                    budget.category, budget.month, budget.year, other.id
                );
                Err(BudgetError::Duplicate {
                    category: budget.category.clone(),
                    month: budget.month,
                    year: budget.year,
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}
