//! Implements a SQLite backed goal store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    DatabaseID, Error,
    db::{CreateTable, MapRow},
    models::{Goal, NewGoal},
    stores::GoalStore,
};

/// Creates, retrieves, and funds savings goals to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteGoalStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteGoalStore {
    /// Create a new goal store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl GoalStore for SQLiteGoalStore {
    /// Create a goal in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyName] if the name is empty,
    /// - [Error::NonPositiveAmount] if the target amount is zero or negative
    ///   or the current amount is negative,
    /// - [Error::SqlError] if there is an SQL error.
    fn create(&mut self, new_goal: NewGoal) -> Result<Goal, Error> {
        new_goal.validate()?;

        let connection = self.connection.lock().unwrap();
        connection.execute(
            "INSERT INTO goal (name, target_amount, current_amount, target_date, description)
            VALUES (?1, ?2, ?3, ?4, ?5);",
            (
                &new_goal.name,
                new_goal.target_amount,
                new_goal.current_amount,
                new_goal.target_date,
                &new_goal.description,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Goal {
            id,
            name: new_goal.name,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount,
            target_date: new_goal.target_date,
            description: new_goal.description,
        })
    }

    /// Retrieve the goal with `goal_id` from the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get(&self, goal_id: DatabaseID) -> Result<Goal, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, target_amount, current_amount, target_date, description
                FROM goal WHERE id = :id;",
            )?
            .query_row(&[(":id", &goal_id)], SQLiteGoalStore::map_row)
            .map_err(|error| error.into())
    }

    /// Retrieve all goals in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Goal>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, target_amount, current_amount, target_date, description
                FROM goal;",
            )?
            .query_map([], SQLiteGoalStore::map_row)?
            .map(|maybe_goal| maybe_goal.map_err(|error| error.into()))
            .collect()
    }

    /// Replace the goal with `goal_id` in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyName] or [Error::NonPositiveAmount] if the new data is
    ///   invalid,
    /// - [Error::UpdateMissingGoal] if `goal_id` does not refer to a valid
    ///   goal,
    /// - [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, goal_id: DatabaseID, new_goal: NewGoal) -> Result<Goal, Error> {
        new_goal.validate()?;

        let rows_updated = self.connection.lock().unwrap().execute(
            "UPDATE goal
            SET name = ?1, target_amount = ?2, current_amount = ?3, target_date = ?4,
                description = ?5
            WHERE id = ?6;",
            (
                &new_goal.name,
                new_goal.target_amount,
                new_goal.current_amount,
                new_goal.target_date,
                &new_goal.description,
                goal_id,
            ),
        )?;

        if rows_updated == 0 {
            return Err(Error::UpdateMissingGoal);
        }

        Ok(Goal {
            id: goal_id,
            name: new_goal.name,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount,
            target_date: new_goal.target_date,
            description: new_goal.description,
        })
    }

    /// Remove the goal with `goal_id` from the database.
    ///
    /// # Errors
    /// This function will return a [Error::DeleteMissingGoal] if `goal_id`
    /// does not refer to a valid goal.
    fn delete(&mut self, goal_id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM goal WHERE id = ?1;", (goal_id,))?;

        if rows_deleted == 0 {
            return Err(Error::DeleteMissingGoal);
        }

        Ok(())
    }

    /// Add `amount` to the goal's current amount.
    ///
    /// The amount is validated before any mutation, so a rejected funding
    /// request leaves the goal unchanged.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if `amount` is zero or negative,
    /// - [Error::NotFound] if `goal_id` does not refer to a valid goal.
    fn add_funds(&mut self, goal_id: DatabaseID, amount: f64) -> Result<Goal, Error> {
        if amount <= 0.0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        let rows_updated = self.connection.lock().unwrap().execute(
            "UPDATE goal SET current_amount = current_amount + ?1 WHERE id = ?2;",
            (amount, goal_id),
        )?;

        if rows_updated == 0 {
            return Err(Error::NotFound);
        }

        self.get(goal_id)
    }
}

impl CreateTable for SQLiteGoalStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS goal (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                target_amount REAL NOT NULL,
                current_amount REAL NOT NULL DEFAULT 0,
                target_date TEXT NOT NULL,
                description TEXT
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteGoalStore {
    type ReturnType = Goal;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Self::ReturnType {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            target_amount: row.get(offset + 2)?,
            current_amount: row.get(offset + 3)?,
            target_date: row.get(offset + 4)?,
            description: row.get(offset + 5)?,
        })
    }
}
