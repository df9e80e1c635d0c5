//! Implements the store traits on top of a shared SQLite connection.

use std::str::FromStr;

mod budget;
mod category;
mod goal;
mod transaction;

pub use budget::SQLiteBudgetStore;
pub use category::SQLiteCategoryStore;
pub use goal::SQLiteGoalStore;
pub use transaction::SQLiteTransactionStore;

/// Parse a TEXT column into an enum-like type, reporting parse failures as
/// SQL conversion errors so they surface through the usual error path.
pub(crate) fn parse_text_column<T>(raw: &str, column: usize) -> Result<T, rusqlite::Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|error: T::Err| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            error.to_string().into(),
        )
    })
}
