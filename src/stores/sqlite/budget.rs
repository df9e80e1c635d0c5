//! Implements a SQLite backed budget store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    DatabaseID, Error,
    db::{CreateTable, MapRow},
    models::{Budget, NewBudget},
    stores::BudgetStore,
};

/// Creates and retrieves budgets to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteBudgetStore {
    /// Create a new budget store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl BudgetStore for SQLiteBudgetStore {
    /// Create a budget in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if the limit is zero or negative,
    /// - [Error::InvalidCategory] if the category ID does not refer to a
    ///   valid category,
    /// - [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, new_budget: NewBudget) -> Result<Budget, Error> {
        new_budget.validate()?;

        let connection = self.connection.lock().unwrap();
        connection
            .execute(
                "INSERT INTO budget (category_id, amount, period) VALUES (?1, ?2, ?3);",
                (new_budget.category_id, new_budget.amount, &new_budget.period),
            )
            .map_err(|error| match Error::from(error) {
                Error::InvalidCategory(None) => {
                    Error::InvalidCategory(Some(new_budget.category_id))
                }
                error => error,
            })?;

        let id = connection.last_insert_rowid();

        Ok(Budget {
            id,
            category_id: new_budget.category_id,
            amount: new_budget.amount,
            period: new_budget.period,
        })
    }

    /// Retrieve the budget with `budget_id` from the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get(&self, budget_id: DatabaseID) -> Result<Budget, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, category_id, amount, period FROM budget WHERE id = :id;")?
            .query_row(&[(":id", &budget_id)], SQLiteBudgetStore::map_row)
            .map_err(|error| error.into())
    }

    /// Retrieve all budgets in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Budget>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, category_id, amount, period FROM budget;")?
            .query_map([], SQLiteBudgetStore::map_row)?
            .map(|maybe_budget| maybe_budget.map_err(|error| error.into()))
            .collect()
    }

    /// Replace the budget with `budget_id` in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if the new limit is zero or negative,
    /// - [Error::UpdateMissingBudget] if `budget_id` does not refer to a
    ///   valid budget,
    /// - [Error::InvalidCategory] if the new category ID does not refer to a
    ///   valid category,
    /// - [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, budget_id: DatabaseID, new_budget: NewBudget) -> Result<Budget, Error> {
        new_budget.validate()?;

        let rows_updated = self
            .connection
            .lock()
            .unwrap()
            .execute(
                "UPDATE budget SET category_id = ?1, amount = ?2, period = ?3 WHERE id = ?4;",
                (
                    new_budget.category_id,
                    new_budget.amount,
                    &new_budget.period,
                    budget_id,
                ),
            )
            .map_err(|error| match Error::from(error) {
                Error::InvalidCategory(None) => {
                    Error::InvalidCategory(Some(new_budget.category_id))
                }
                error => error,
            })?;

        if rows_updated == 0 {
            return Err(Error::UpdateMissingBudget);
        }

        Ok(Budget {
            id: budget_id,
            category_id: new_budget.category_id,
            amount: new_budget.amount,
            period: new_budget.period,
        })
    }

    /// Remove the budget with `budget_id` from the database.
    ///
    /// # Errors
    /// This function will return a [Error::DeleteMissingBudget] if `budget_id`
    /// does not refer to a valid budget.
    fn delete(&mut self, budget_id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM budget WHERE id = ?1;", (budget_id,))?;

        if rows_deleted == 0 {
            return Err(Error::DeleteMissingBudget);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteBudgetStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY,
                category_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                period TEXT NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id)
                    ON UPDATE CASCADE ON DELETE CASCADE
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteBudgetStore {
    type ReturnType = Budget;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Self::ReturnType {
            id: row.get(offset)?,
            category_id: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            period: row.get(offset + 3)?,
        })
    }
}
