//! Budget allocations, spending reports, transactions and net worth

mod allocation;
mod usage;
mod transaction;
mod net_worth;

pub use allocation::BudgetAllocation;
pub use usage::{BudgetUsage, CategoryUsage};
pub use transaction::{spending_by_category, CashFlow, Transaction, TransactionKind};
pub use net_worth::{BalanceItem, BalanceSheet, NetWorth, ASSET_CATEGORIES, LIABILITY_CATEGORIES};
