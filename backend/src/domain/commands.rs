//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are not
//! exposed over the public API. The REST layer maps the DTOs from the
//! `shared` crate to these types.

pub mod transactions {
    use crate::domain::models::{Transaction, TransactionKind};
    use crate::domain::OverspendCheck;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    /// Input for creating a transaction, also used for full-replace updates.
    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        pub amount: Decimal,
        pub label: String,
        pub kind: TransactionKind,
        pub category: String,
        /// Today's date is used when absent.
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateTransactionCommand {
        pub transaction_id: i64,
        pub replacement: CreateTransactionCommand,
    }

    /// Filters for listing transactions. Both date bounds are inclusive.
    #[derive(Debug, Clone, Default)]
    pub struct TransactionListQuery {
        pub category: Option<String>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    /// Result of creating a transaction.
    #[derive(Debug, Clone)]
    pub struct CreateTransactionResult {
        pub transaction: Transaction,
        pub overspend: OverspendCheck,
    }
}

pub mod budgets {
    use rust_decimal::Decimal;

    #[derive(Debug, Clone)]
    pub struct CreateBudgetCommand {
        pub category: String,
        pub cap_amount: Decimal,
        pub month: u32,
        pub year: i32,
    }

    /// Partial update: `None` keeps the stored value.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateBudgetCommand {
        pub budget_id: i64,
        pub category: Option<String>,
        pub cap_amount: Option<Decimal>,
        pub month: Option<u32>,
        pub year: Option<i32>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct BudgetListQuery {
        pub category: Option<String>,
        pub month: Option<u32>,
        pub year: Option<i32>,
    }
}
