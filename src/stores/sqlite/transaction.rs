//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    DatabaseID, Error,
    db::{CreateTable, MapRow},
    models::{NewTransaction, Transaction},
    stores::TransactionStore,
    stores::sqlite::parse_text_column,
};

/// Creates and retrieves transactions to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new transaction store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidCategory] if the category ID does not refer to a
    ///   valid category,
    /// - [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        connection
            .execute(
                "INSERT INTO \"transaction\" (description, amount, date, kind, category_id)
                VALUES (?1, ?2, ?3, ?4, ?5);",
                (
                    &new_transaction.description,
                    new_transaction.amount,
                    new_transaction.date,
                    new_transaction.transaction_type.as_str(),
                    new_transaction.category_id,
                ),
            )
            .map_err(|error| match Error::from(error) {
                Error::InvalidCategory(None) => {
                    Error::InvalidCategory(Some(new_transaction.category_id))
                }
                error => error,
            })?;

        let id = connection.last_insert_rowid();

        Ok(Transaction {
            id,
            description: new_transaction.description,
            amount: new_transaction.amount,
            date: new_transaction.date,
            transaction_type: new_transaction.transaction_type,
            category_id: new_transaction.category_id,
        })
    }

    /// Retrieve the transaction with `transaction_id` from the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get(&self, transaction_id: DatabaseID) -> Result<Transaction, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, description, amount, date, kind, category_id
                FROM \"transaction\" WHERE id = :id;",
            )?
            .query_row(
                &[(":id", &transaction_id)],
                SQLiteTransactionStore::map_row,
            )
            .map_err(|error| error.into())
    }

    /// Retrieve all transactions in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, description, amount, date, kind, category_id FROM \"transaction\";",
            )?
            .query_map([], SQLiteTransactionStore::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// Replace the transaction with `transaction_id` in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingTransaction] if `transaction_id` does not refer
    ///   to a valid transaction,
    /// - [Error::InvalidCategory] if the new category ID does not refer to a
    ///   valid category,
    /// - [Error::SqlError] if there is some other SQL error.
    fn update(
        &mut self,
        transaction_id: DatabaseID,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let rows_updated = self
            .connection
            .lock()
            .unwrap()
            .execute(
                "UPDATE \"transaction\"
                SET description = ?1, amount = ?2, date = ?3, kind = ?4, category_id = ?5
                WHERE id = ?6;",
                (
                    &new_transaction.description,
                    new_transaction.amount,
                    new_transaction.date,
                    new_transaction.transaction_type.as_str(),
                    new_transaction.category_id,
                    transaction_id,
                ),
            )
            .map_err(|error| match Error::from(error) {
                Error::InvalidCategory(None) => {
                    Error::InvalidCategory(Some(new_transaction.category_id))
                }
                error => error,
            })?;

        if rows_updated == 0 {
            return Err(Error::UpdateMissingTransaction);
        }

        Ok(Transaction {
            id: transaction_id,
            description: new_transaction.description,
            amount: new_transaction.amount,
            date: new_transaction.date,
            transaction_type: new_transaction.transaction_type,
            category_id: new_transaction.category_id,
        })
    }

    /// Remove the transaction with `transaction_id` from the database.
    ///
    /// # Errors
    /// This function will return a [Error::DeleteMissingTransaction] if
    /// `transaction_id` does not refer to a valid transaction.
    fn delete(&mut self, transaction_id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM \"transaction\" WHERE id = ?1;", (transaction_id,))?;

        if rows_deleted == 0 {
            return Err(Error::DeleteMissingTransaction);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                kind TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id)
                    ON UPDATE CASCADE ON DELETE CASCADE
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_type: String = row.get(offset + 4)?;

        Ok(Self::ReturnType {
            id: row.get(offset)?,
            description: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            date: row.get(offset + 3)?,
            transaction_type: parse_text_column(&raw_type, offset + 4)?,
            category_id: row.get(offset + 5)?,
        })
    }
}
