//! The domain models for the ledger: categories, transactions, budgets, and
//! goals, plus the validated types needed to create them.

mod budget;
mod category;
mod goal;
mod transaction;

pub use budget::{Budget, NewBudget};
pub use category::{Category, CategoryColor, CategoryName, NewCategory};
pub use goal::{Goal, NewGoal};
pub use transaction::{NewTransaction, Transaction, TransactionType};
