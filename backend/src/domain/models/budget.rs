//! Domain model for a monthly category budget.
use rust_decimal::Decimal;

use super::transaction::MAX_AMOUNT;

pub const MIN_BUDGET_YEAR: i32 = 2000;
pub const MAX_BUDGET_YEAR: i32 = 2100;

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub cap_amount: Decimal,
    pub month: u32,
    pub year: i32,
}

/// Budget fields before the store assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: String,
    pub cap_amount: Decimal,
    pub month: u32,
    pub year: i32,
}

impl NewBudget {
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }
        if self.cap_amount <= Decimal::ZERO {
            return Err(BudgetValidationError::NonPositiveCap);
        }
        if self.cap_amount > MAX_AMOUNT {
            return Err(BudgetValidationError::CapTooLarge);
        }
        if !(1..=12).contains(&self.month) {
            return Err(BudgetValidationError::InvalidMonth(self.month));
        }
        if !(MIN_BUDGET_YEAR..=MAX_BUDGET_YEAR).contains(&self.year) {
            return Err(BudgetValidationError::InvalidYear(self.year));
        }
        Ok(())
    }

    pub fn with_id(self, id: i64) -> Budget {
        Budget {
            id,
            category: self.category,
            cap_amount: self.cap_amount,
            month: self.month,
            year: self.year,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BudgetValidationError {
    #[error("Category cannot be empty")]
    EmptyCategory,
    #[error("Budget amount must be strictly positive")]
    NonPositiveCap,
    #[error("Budget amount must not exceed {}", MAX_AMOUNT)]
    CapTooLarge,
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("Year must be between 2000 and 2100, got {0}")]
    InvalidYear(i32),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BudgetError {
    #[error("Budget {0} not found")]
    NotFound(i64),
    #[error("A budget already exists for category '{category}' in {month:02}/{year}")]
    Duplicate {
        category: String,
        month: u32,
        year: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_budget(cap: Decimal, month: u32, year: i32) -> NewBudget {
        NewBudget {
            category: "alimentation".to_string(),
            cap_amount: cap,
            month,
            year,
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(new_budget(dec!(300), 1, 2000).validate().is_ok());
        assert!(new_budget(dec!(0.01), 12, 2100).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        assert_eq!(new_budget(dec!(-100), 1, 2026).validate(), Err(BudgetValidationError::NonPositiveCap));
        assert_eq!(new_budget(dec!(300), 13, 2026).validate(), Err(BudgetValidationError::InvalidMonth(13)));
        assert_eq!(new_budget(dec!(300), 0, 2026).validate(), Err(BudgetValidationError::InvalidMonth(0)));
        assert_eq!(new_budget(dec!(300), 1, 1999).validate(), Err(BudgetValidationError::InvalidYear(1999)));
        assert_eq!(
            new_budget(MAX_AMOUNT + dec!(1), 1, 2026).validate(),
            Err(BudgetValidationError::CapTooLarge)
        );

        let mut blank = new_budget(dec!(300), 1, 2026);
        blank.category = String::new();
        assert_eq!(blank.validate(), Err(BudgetValidationError::EmptyCategory));
    }

    #[test]
    fn test_duplicate_message_names_triple() {
        let error = BudgetError::Duplicate {
            category: "alimentation".to_string(),
            month: 1,
            year: 2026,
        };
        assert_eq!(
            error.to_string(),
            "A budget already exists for category 'alimentation' in 01/2026"
        );
    }
}
