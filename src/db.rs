/*! This module defines and implements traits for interacting with the application's database. */

use rusqlite::{Connection, Error, Row, Transaction as SqlTransaction};

use crate::stores::sqlite::{
    SQLiteBudgetStore, SQLiteCategoryStore, SQLiteGoalStore, SQLiteTransactionStore,
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub trait MapRow {
    /// The type that rows are mapped to.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the table columns in the
    /// order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if
    /// an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type.
    ///
    /// The `offset` indicates which column the row should be read from.
    /// This is useful in cases where tables have been joined and you want to construct two
    /// different types from the one query.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if
    /// an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, Error>;
}

/// Create the application's tables and enable foreign key enforcement.
///
/// Safe to call on an existing database: tables are only created if missing.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), crate::Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteCategoryStore::create_table(&transaction)?;
    SQLiteTransactionStore::create_table(&transaction)?;
    SQLiteBudgetStore::create_table(&transaction)?;
    SQLiteGoalStore::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_all_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        let mut statement = connection
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        let table_names: Vec<String> = statement
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|name| name.unwrap())
            .collect();

        for table in ["budget", "category", "goal", "transaction"] {
            assert!(
                table_names.iter().any(|name| name == table),
                "missing table {table}, got {table_names:?}"
            );
        }
    }

    #[test]
    fn is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        initialize(&connection).unwrap();
    }
}
