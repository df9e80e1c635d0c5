//! Fintrack is a web app for tracking personal finances: a ledger of
//! categories, transactions, budgets, and goals, with summaries derived from
//! the ledger on every read.
//!
//! This library provides a JSON REST API over a SQLite database. All derived
//! data (balances, category breakdowns, monthly trends, budget utilization)
//! is recomputed from the live ledger by the [aggregation] module and never
//! persisted.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use time::Date;
use tokio::signal;

pub mod aggregation;
pub mod auth;
pub mod db;
pub mod endpoints;
pub mod models;
pub mod routes;
pub mod stores;

mod database_id;
mod logging;
mod routing;
mod state;
mod timezone;

pub use database_id::DatabaseID;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use state::AppState;
pub use timezone::local_today;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An empty string was used where a name is required (category or goal).
    #[error("name cannot be empty")]
    EmptyName,

    /// A string could not be parsed as a transaction type.
    ///
    /// Only "income" and "expense" are valid transaction types.
    #[error("\"{0}\" is not a valid transaction type")]
    InvalidTransactionType(String),

    /// A string could not be parsed as a category color.
    ///
    /// Category colors come from a fixed palette, see
    /// [CategoryColor](crate::models::CategoryColor).
    #[error("\"{0}\" is not a valid category color")]
    InvalidColor(String),

    /// A zero or negative amount was used where a positive amount is
    /// required (transaction amounts, budget limits, goal targets, funding
    /// deltas).
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    NonPositiveAmount(f64),

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore future
    /// dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// The category ID used to create a transaction or budget did not match a
    /// valid category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<DatabaseID>),

    /// An unsupported number of months was requested for the trends report.
    ///
    /// The window must be between one month and
    /// [MAX_TREND_MONTHS](crate::aggregation::MAX_TREND_MONTHS).
    #[error("{0} is not a valid number of months for the trends window")]
    InvalidTrendMonths(u32),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to update a budget that does not exist
    #[error("tried to update a budget that is not in the database")]
    UpdateMissingBudget,

    /// Tried to delete a budget that does not exist
    #[error("tried to delete a budget that is not in the database")]
    DeleteMissingBudget,

    /// Tried to update a goal that does not exist
    #[error("tried to update a goal that is not in the database")]
    UpdateMissingGoal,

    /// Tried to delete a goal that does not exist
    #[error("tried to delete a goal that is not in the database")]
    DeleteMissingGoal,

    /// The external authentication webhook could not be reached or returned
    /// an unexpected response.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("challenge request failed: {0}")]
    ChallengeRequestFailed(String),

    /// The external authentication webhook rejected the challenge ID.
    ///
    /// The client should request a new challenge and try again.
    #[error("the challenge ID does not refer to an active challenge")]
    ChallengeExpired,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidCategory(None)
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code that should be sent to the client for this error.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound
            | Error::UpdateMissingTransaction
            | Error::DeleteMissingTransaction
            | Error::UpdateMissingCategory
            | Error::DeleteMissingCategory
            | Error::UpdateMissingBudget
            | Error::DeleteMissingBudget
            | Error::UpdateMissingGoal
            | Error::DeleteMissingGoal => StatusCode::NOT_FOUND,
            Error::EmptyName
            | Error::InvalidTransactionType(_)
            | Error::InvalidColor(_)
            | Error::NonPositiveAmount(_)
            | Error::FutureDate(_)
            | Error::InvalidCategory(_)
            | Error::InvalidTrendMonths(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::ChallengeExpired => StatusCode::UNAUTHORIZED,
            Error::ChallengeRequestFailed(_) => StatusCode::BAD_GATEWAY,
            Error::InvalidTimezoneError(_) | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = match &self {
            // Internal details must not leak to the client.
            Error::SqlError(_) | Error::ChallengeRequestFailed(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
                "an internal error occurred, check the server logs for more details".to_string()
            }
            Error::InvalidTimezoneError(timezone) => {
                tracing::error!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                );
                "the server timezone is misconfigured".to_string()
            }
            error => error.to_string(),
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;

    use super::Error;

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(Error::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::DeleteMissingGoal.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn invalid_input_maps_to_422() {
        assert_eq!(
            Error::NonPositiveAmount(-10.0).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(Error::EmptyName.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            Error::InvalidTrendMonths(0).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
