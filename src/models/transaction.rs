//! This file defines the `Transaction` type, the core type of the ledger, and
//! the `TransactionType` enum shared with categories.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{DatabaseID, Error};

/// Whether money flowed in (income) or out (expense).
///
/// Categories carry the same vocabulary: a category classifies transactions
/// of its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g., wages.
    Income,
    /// Money spent, e.g., groceries.
    Expense,
}

impl TransactionType {
    /// The string stored in the database for this transaction type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_string())),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Amounts are always positive; the direction of the money flow is given by
/// `transaction_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category_id: DatabaseID,
}

/// The data for creating or replacing a [Transaction].
///
/// The ID is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned. Must be greater than zero.
    pub amount: f64,
    /// When the transaction happened. Must not be in the future.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category_id: DatabaseID,
}

impl NewTransaction {
    /// Check that the transaction data can be added to the ledger.
    ///
    /// `today` is the current date in the server's configured timezone, see
    /// [local_today](crate::local_today).
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if `amount` is zero or negative,
    /// - [Error::FutureDate] if `date` is later than `today`.
    pub fn validate(&self, today: Date) -> Result<(), Error> {
        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        if self.date > today {
            return Err(Error::FutureDate(self.date));
        }

        Ok(())
    }
}

#[cfg(test)]
mod transaction_type_tests {
    use crate::Error;

    use super::TransactionType;

    #[test]
    fn parses_income_and_expense() {
        assert_eq!("income".parse(), Ok(TransactionType::Income));
        assert_eq!("expense".parse(), Ok(TransactionType::Expense));
    }

    #[test]
    fn rejects_unknown_type() {
        let result = "transfer".parse::<TransactionType>();

        assert_eq!(
            result,
            Err(Error::InvalidTransactionType("transfer".to_string()))
        );
    }

    #[test]
    fn round_trips_through_as_str() {
        for transaction_type in [TransactionType::Income, TransactionType::Expense] {
            assert_eq!(transaction_type.as_str().parse(), Ok(transaction_type));
        }
    }
}

#[cfg(test)]
mod new_transaction_tests {
    use time::{Duration, macros::date};

    use crate::Error;

    use super::{NewTransaction, TransactionType};

    fn new_transaction(amount: f64, date: time::Date) -> NewTransaction {
        NewTransaction {
            description: "Rust Pie".to_string(),
            amount,
            date,
            transaction_type: TransactionType::Expense,
            category_id: 1,
        }
    }

    #[test]
    fn validate_fails_on_non_positive_amount() {
        let today = date!(2025 - 01 - 15);

        for amount in [0.0, -42.5] {
            let result = new_transaction(amount, today).validate(today);

            assert_eq!(result, Err(Error::NonPositiveAmount(amount)));
        }
    }

    #[test]
    fn validate_fails_on_future_date() {
        let today = date!(2025 - 01 - 15);
        let tomorrow = today + Duration::days(1);

        let result = new_transaction(12.5, tomorrow).validate(today);

        assert_eq!(result, Err(Error::FutureDate(tomorrow)));
    }

    #[test]
    fn validate_succeeds_on_today_and_past_dates() {
        let today = date!(2025 - 01 - 15);

        for date in [today, today - Duration::days(30)] {
            assert_eq!(new_transaction(12.5, date).validate(today), Ok(()));
        }
    }

    #[test]
    fn date_round_trips_as_iso8601_string_in_json() {
        let json = r#"{
            "description": "Rust Pie",
            "amount": 12.5,
            "date": "2025-01-15",
            "type": "expense",
            "category_id": 1
        }"#;

        let transaction: NewTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(transaction.date, date!(2025 - 01 - 15));

        let value = serde_json::to_value(&transaction).unwrap();
        assert_eq!(value["date"], serde_json::json!("2025-01-15"));
    }
}
