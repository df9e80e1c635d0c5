//! This file defines the `Goal` type, a savings target funded over time.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{DatabaseID, Error};

/// A savings goal, e.g., "Emergency fund: $10,000 by December".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// The ID of the goal.
    pub id: DatabaseID,
    /// The name of the goal.
    pub name: String,
    /// The amount of money to save.
    pub target_amount: f64,
    /// The amount of money saved so far.
    pub current_amount: f64,
    /// When the goal should be reached by.
    pub target_date: Date,
    /// An optional longer description of the goal.
    pub description: Option<String>,
}

impl Goal {
    /// How far along the goal is, as a whole-number percentage capped at 100.
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }

        (self.current_amount / self.target_amount * 100.0)
            .round()
            .min(100.0)
    }
}

/// The data for creating or replacing a [Goal].
///
/// The ID is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    /// The name of the goal. Must not be empty.
    pub name: String,
    /// The amount of money to save. Must be greater than zero.
    pub target_amount: f64,
    /// The amount of money already saved. Defaults to zero.
    #[serde(default)]
    pub current_amount: f64,
    /// When the goal should be reached by.
    pub target_date: Date,
    /// An optional longer description of the goal.
    pub description: Option<String>,
}

impl NewGoal {
    /// Check that the goal data can be added to the ledger.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyName] if the name is an empty string,
    /// - [Error::NonPositiveAmount] if the target amount is zero or negative,
    ///   or if the current amount is negative.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::EmptyName);
        }

        if self.target_amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.target_amount));
        }

        if self.current_amount < 0.0 {
            return Err(Error::NonPositiveAmount(self.current_amount));
        }

        Ok(())
    }
}
