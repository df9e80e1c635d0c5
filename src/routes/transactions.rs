//! Handlers for creating, listing, updating, and deleting transactions.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    DatabaseID, Error, local_today,
    models::{NewTransaction, Transaction},
    state::TransactionState,
    stores::TransactionStore,
};

/// List all transactions.
pub async fn get_transactions<T>(
    State(state): State<TransactionState<T>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    state.transaction_store.get_all().map(Json)
}

/// Create a new transaction.
///
/// The transaction date is validated against today's date in the server's
/// configured timezone, so a transaction dated "today" is accepted anywhere
/// in the world that the server is configured for.
pub async fn create_transaction<T>(
    State(mut state): State<TransactionState<T>>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    new_transaction.validate(local_today(&state.timezone)?)?;
    let transaction = state.transaction_store.create(new_transaction)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Replace the transaction with `transaction_id`.
pub async fn update_transaction<T>(
    State(mut state): State<TransactionState<T>>,
    Path(transaction_id): Path<DatabaseID>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    new_transaction.validate(local_today(&state.timezone)?)?;

    state
        .transaction_store
        .update(transaction_id, new_transaction)
        .map(Json)
}

/// Delete the transaction with `transaction_id`.
pub async fn delete_transaction<T>(
    State(mut state): State<TransactionState<T>>,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<StatusCode, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    state.transaction_store.delete(transaction_id)?;

    Ok(StatusCode::NO_CONTENT)
}
