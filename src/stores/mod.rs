//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).
//!
//! The aggregation engine never talks to a store directly: request handlers
//! read whole collections through these traits and pass plain slices to
//! [aggregation](crate::aggregation).

mod budget;
mod category;
mod goal;
mod transaction;

pub mod sqlite;

pub use budget::BudgetStore;
pub use category::CategoryStore;
pub use goal::GoalStore;
pub use transaction::TransactionStore;
