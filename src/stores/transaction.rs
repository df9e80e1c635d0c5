//! Defines the transaction store trait.

use crate::{
    DatabaseID, Error,
    models::{NewTransaction, Transaction},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// Callers are expected to validate `new_transaction` first, see
    /// [NewTransaction::validate].
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    fn get(&self, transaction_id: DatabaseID) -> Result<Transaction, Error>;

    /// Retrieve all transactions from the store.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Replace the transaction with `transaction_id` with `new_transaction`.
    fn update(
        &mut self,
        transaction_id: DatabaseID,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, Error>;

    /// Remove the transaction with `transaction_id` from the store.
    fn delete(&mut self, transaction_id: DatabaseID) -> Result<(), Error>;
}
