//! Defines the budget store trait.

use crate::{
    DatabaseID, Error,
    models::{Budget, NewBudget},
};

/// Handles the creation and retrieval of budgets.
///
/// Stores hold only the budget limits; the amount spent against each budget
/// is derived at read time by
/// [budget_overview](crate::aggregation::budget_overview).
pub trait BudgetStore {
    /// Create a new budget in the store.
    fn create(&mut self, new_budget: NewBudget) -> Result<Budget, Error>;

    /// Retrieve a budget from the store.
    fn get(&self, budget_id: DatabaseID) -> Result<Budget, Error>;

    /// Retrieve all budgets from the store.
    fn get_all(&self) -> Result<Vec<Budget>, Error>;

    /// Replace the budget with `budget_id` with `new_budget`.
    fn update(&mut self, budget_id: DatabaseID, new_budget: NewBudget) -> Result<Budget, Error>;

    /// Remove the budget with `budget_id` from the store.
    fn delete(&mut self, budget_id: DatabaseID) -> Result<(), Error>;
}
