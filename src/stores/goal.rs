//! Defines the goal store trait.

use crate::{
    DatabaseID, Error,
    models::{Goal, NewGoal},
};

/// Handles the creation, retrieval, and funding of savings goals.
pub trait GoalStore {
    /// Create a new goal in the store.
    fn create(&mut self, new_goal: NewGoal) -> Result<Goal, Error>;

    /// Retrieve a goal from the store.
    fn get(&self, goal_id: DatabaseID) -> Result<Goal, Error>;

    /// Retrieve all goals from the store.
    fn get_all(&self) -> Result<Vec<Goal>, Error>;

    /// Replace the goal with `goal_id` with `new_goal`.
    fn update(&mut self, goal_id: DatabaseID, new_goal: NewGoal) -> Result<Goal, Error>;

    /// Remove the goal with `goal_id` from the store.
    fn delete(&mut self, goal_id: DatabaseID) -> Result<(), Error>;

    /// Add `amount` to the current amount of the goal with `goal_id` and
    /// return the updated goal.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if `amount` is zero or negative (the goal
    ///   is left unchanged),
    /// - [Error::NotFound] if `goal_id` does not refer to a valid goal.
    fn add_funds(&mut self, goal_id: DatabaseID, amount: f64) -> Result<Goal, Error>;
}
