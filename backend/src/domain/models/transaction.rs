//! Domain model for a transaction.
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Upper bound for any single amount or budget cap (10^12).
///
/// Keeps monthly sums and percentages well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Value persisted in the `kind` column
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub label: String,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Transaction fields before the store assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub label: String,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(TransactionValidationError::NonPositiveAmount);
        }
        if self.amount > MAX_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge);
        }
        if self.label.trim().is_empty() {
            return Err(TransactionValidationError::EmptyLabel);
        }
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }
        Ok(())
    }

    pub fn with_id(self, id: i64) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            label: self.label,
            kind: self.kind,
            category: self.category,
            date: self.date,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransactionValidationError {
    #[error("Amount must be strictly positive")]
    NonPositiveAmount,
    #[error("Amount must not exceed {}", MAX_AMOUNT)]
    AmountTooLarge,
    #[error("Label cannot be empty")]
    EmptyLabel,
    #[error("Category cannot be empty")]
    EmptyCategory,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Transaction {0} not found")]
    NotFound(i64),
}
