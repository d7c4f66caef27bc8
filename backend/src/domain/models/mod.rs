pub mod budget;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetError, BudgetValidationError, NewBudget, MAX_BUDGET_YEAR, MIN_BUDGET_YEAR};
pub use period::{DateRange, Period, PeriodError};
pub use transaction::{MAX_AMOUNT, NewTransaction, Transaction, TransactionError, TransactionKind, TransactionValidationError};
