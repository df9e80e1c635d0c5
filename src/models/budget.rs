//! This file defines the `Budget` type, a spending limit for a category.

use serde::{Deserialize, Serialize};

use crate::{DatabaseID, Error};

/// A spending limit for a single category over a labeled period.
///
/// The amount spent against a budget is never stored: it is recomputed from
/// the live transaction set on every read, see
/// [budget_overview](crate::aggregation::budget_overview).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: DatabaseID,
    /// The category the budget limits.
    pub category_id: DatabaseID,
    /// The spending limit.
    pub amount: f64,
    /// A label for the budgeting period, e.g., "monthly".
    pub period: String,
}

/// The data for creating or replacing a [Budget].
///
/// The ID is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    /// The category the budget limits.
    pub category_id: DatabaseID,
    /// The spending limit. Must be greater than zero.
    pub amount: f64,
    /// A label for the budgeting period, e.g., "monthly".
    pub period: String,
}

impl NewBudget {
    /// Check that the budget data can be added to the ledger.
    ///
    /// # Errors
    /// This function will return an [Error::NonPositiveAmount] if the limit
    /// is zero or negative.
    pub fn validate(&self) -> Result<(), Error> {
        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}
