//! Budget statistics engine.
//!
//! Computes monthly spending figures for one category against its budget cap
//! and decides whether a prospective expense would overspend that cap.
//!
//! ## Rules
//!
//! - Only expense transactions of the exact category whose date falls inside
//!   the period contribute to the monthly total
//! - A missing budget is not an error: statistics degrade to zero and the
//!   overspend check reports nothing
//! - Overspend is strict: reaching the cap exactly is allowed
//! - Every figure handed to callers is rounded to 2 decimals
//! - Arithmetic is checked; a figure that does not fit a `Decimal` is a
//!   [`StatisticsError::Overflow`], never a panic
//!
//! The engine only reads. It performs at most two store lookups per call and
//! holds nothing between calls, so a check followed by an insert is not atomic.

use anyhow::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::models::Period;
use crate::storage::SpendingSource;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StatisticsError {
    #[error("Amount overflow while computing {0}")]
    Overflow(&'static str),
}

/// Round a monetary or percentage figure for presentation
pub fn round_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Spending figures for one category in one period
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatistics {
    pub category: String,
    /// "MM/YYYY"
    pub period: String,
    pub total_spent: Decimal,
    pub cap_amount: Decimal,
    pub remaining: Decimal,
    pub percent_consumed: Decimal,
}

/// Result of checking a candidate expense against the budget cap
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverspendCheck {
    pub exceeded: bool,
    pub alert_message: Option<String>,
    pub remaining_before: Option<Decimal>,
    pub cap_amount: Option<Decimal>,
    pub total_after: Option<Decimal>,
}

impl OverspendCheck {
    /// Outcome when no budget applies (no budget, or not an expense)
    pub fn not_applicable() -> Self {
        Self::default()
    }
}

/// Statistics engine over an injected spending source
pub struct BudgetStatisticsService<S: SpendingSource> {
    source: Arc<S>,
}

impl<S: SpendingSource> Clone for BudgetStatisticsService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: SpendingSource> BudgetStatisticsService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Sum of the category's expenses within the period (0 when there are none)
    pub async fn monthly_expense_total(&self, category: &str, period: &Period) -> Result<Decimal> {
        let total = self
            .source
            .find_expense_total(category, &period.date_range())
            .await?;
        debug!("Expense total for '{}' in {}: {}", category, period, total);
        Ok(total)
    }

    /// Cap minus spent, negative once overspent. 0 when no budget exists.
    pub async fn remaining_amount(&self, category: &str, period: &Period) -> Result<Decimal> {
        let Some(budget) = self.source.find_budget(category, period.month(), period.year()).await? else {
            return Ok(Decimal::ZERO);
        };

        let total = self.monthly_expense_total(category, period).await?;
        Ok(remaining_of(budget.cap_amount, total)?)
    }

    /// Share of the cap already spent, as a percentage. Not clamped to 100.
    pub async fn percent_consumed(&self, category: &str, period: &Period) -> Result<Decimal> {
        let Some(budget) = self.source.find_budget(category, period.month(), period.year()).await? else {
            return Ok(Decimal::ZERO);
        };
        if budget.cap_amount.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let total = self.monthly_expense_total(category, period).await?;
        Ok(percent_of(total, budget.cap_amount)?)
    }

    /// Rounded read model combining the three figures above
    pub async fn statistics_snapshot(&self, category: &str, period: &Period) -> Result<BudgetStatistics> {
        let budget = self.source.find_budget(category, period.month(), period.year()).await?;

        let Some(budget) = budget else {
            debug!("No budget for '{}' in {}, returning empty statistics", category, period);
            return Ok(BudgetStatistics {
                category: category.to_string(),
                period: period.label(),
                total_spent: Decimal::ZERO,
                cap_amount: Decimal::ZERO,
                remaining: Decimal::ZERO,
                percent_consumed: Decimal::ZERO,
            });
        };

        let total = self.monthly_expense_total(category, period).await?;
        let percent = if budget.cap_amount.is_zero() {
            Decimal::ZERO
        } else {
            percent_of(total, budget.cap_amount)?
        };
        let remaining = remaining_of(budget.cap_amount, total)?;

        Ok(BudgetStatistics {
            category: category.to_string(),
            period: period.label(),
            total_spent: round_2dp(total),
            cap_amount: round_2dp(budget.cap_amount),
            remaining: round_2dp(remaining),
            percent_consumed: round_2dp(percent),
        })
    }

    /// Would adding `candidate_amount` push the category past its cap?
    ///
    /// Advisory only; nothing is written.
    pub async fn check_overspend(
        &self,
        category: &str,
        period: &Period,
        candidate_amount: Decimal,
    ) -> Result<OverspendCheck> {
        let Some(budget) = self.source.find_budget(category, period.month(), period.year()).await? else {
            debug!("No budget for '{}' in {}, skipping overspend check", category, period);
            return Ok(OverspendCheck::not_applicable());
        };

        let total_before = self.monthly_expense_total(category, period).await?;
        let remaining_before = remaining_of(budget.cap_amount, total_before)?;
        let total_after = total_before
            .checked_add(candidate_amount)
            .ok_or(StatisticsError::Overflow("total after expense"))?;
        let exceeded = total_after > budget.cap_amount;

        let alert_message = if exceeded {
            let overage = total_after - budget.cap_amount;
            let message = format!(
                "Budget overspend for '{}' in {}: cap {:.2} €, total after this expense {:.2} €, over by {:.2} €",
                category,
                period.label(),
                round_2dp(budget.cap_amount),
                round_2dp(total_after),
                round_2dp(overage),
            );
            warn!("{}", message);
            Some(message)
        } else {
            None
        };

        Ok(OverspendCheck {
            exceeded,
            alert_message,
            remaining_before: Some(round_2dp(remaining_before)),
            cap_amount: Some(round_2dp(budget.cap_amount)),
            total_after: Some(round_2dp(total_after)),
        })
    }
}

fn remaining_of(cap: Decimal, total: Decimal) -> Result<Decimal, StatisticsError> {
    cap.checked_sub(total).ok_or(StatisticsError::Overflow("remaining amount"))
}

// Multiply first so exact ratios stay exact
fn percent_of(total: Decimal, cap: Decimal) -> Result<Decimal, StatisticsError> {
    total
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(cap))
        .ok_or(StatisticsError::Overflow("percent consumed"))
}
