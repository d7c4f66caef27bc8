//! Conversions between the `shared` DTOs and domain types.

pub mod budget_mapper;
pub mod transaction_mapper;

pub use budget_mapper::BudgetMapper;
pub use transaction_mapper::TransactionMapper;
