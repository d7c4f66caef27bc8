use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A stored income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Always strictly positive; the direction is carried by `kind`
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub label: String,
    pub kind: TransactionKind,
    pub category: String,
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Body for creating a transaction, also used for full-replace updates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub label: String,
    pub kind: TransactionKind,
    pub category: String,
    /// Defaults to today when omitted
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Response after creating a transaction.
///
/// The overspend fields are advisory: the transaction has been stored either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub overspend_alert: bool,
    pub alert_message: Option<String>,
}

/// Optional filters for listing transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionListRequest {
    pub category: Option<String>,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
}

/// A spending cap for one category in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cap_amount: Decimal,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBudgetRequest {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cap_amount: Decimal,
    pub month: u32,
    pub year: i32,
}

/// Partial update: only the provided fields are changed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBudgetRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub cap_amount: Option<Decimal>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Optional filters for listing budgets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetListRequest {
    pub category: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Month/year selector for statistics endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsPeriodRequest {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Read model for one category in one month. All amounts are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatistics {
    pub category: String,
    /// Zero-padded "MM/YYYY"
    pub period: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cap_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percent_consumed: Decimal,
}

/// Body for asking whether a prospective expense would overspend a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverspendCheckRequest {
    pub category: String,
    pub month: u32,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Outcome of an overspend pre-check. Numeric fields are absent when the
/// category has no budget for the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverspendCheck {
    pub exceeded: bool,
    pub alert_message: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub remaining_before: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub cap_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_after: Option<Decimal>,
}

/// Uniform error body returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
