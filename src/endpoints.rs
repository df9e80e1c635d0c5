//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/goals/{goal_id}/funds',
//! use [format_endpoint].

/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to update or delete a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to list budgets (with computed spent) and create budgets.
pub const BUDGETS: &str = "/api/budgets";
/// The route to update or delete a single budget.
pub const BUDGET: &str = "/api/budgets/{budget_id}";
/// The route to list and create goals.
pub const GOALS: &str = "/api/goals";
/// The route to update or delete a single goal.
pub const GOAL: &str = "/api/goals/{goal_id}";
/// The route to add funds to a goal.
pub const GOAL_FUNDS: &str = "/api/goals/{goal_id}/funds";
/// The route for the overall income/expense/balance summary.
pub const REPORT_SUMMARY: &str = "/api/reports/summary";
/// The route for the per-category breakdown of one transaction type.
pub const REPORT_CATEGORIES: &str = "/api/reports/categories";
/// The route for the monthly income/expense trend series.
pub const REPORT_TRENDS: &str = "/api/reports/trends";
/// The route to request a one-time-code challenge from the auth webhook.
pub const AUTH_CHALLENGE: &str = "/api/auth/challenge";
/// The route to verify a one-time code against a pending challenge.
pub const AUTH_VERIFY: &str = "/api/auth/verify";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/goals/{goal_id}/funds',
/// '{goal_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };
    let Some(end) = endpoint_path.find('}') else {
        return endpoint_path.to_string();
    };

    format!(
        "{}{}{}",
        &endpoint_path[..start],
        id,
        &endpoint_path[end + 1..]
    )
}

#[cfg(test)]
mod format_endpoint_tests {
    use super::{GOAL_FUNDS, TRANSACTION, format_endpoint};

    #[test]
    fn replaces_parameter_with_id() {
        assert_eq!(format_endpoint(TRANSACTION, 42), "/api/transactions/42");
        assert_eq!(format_endpoint(GOAL_FUNDS, 7), "/api/goals/7/funds");
    }

    #[test]
    fn leaves_paths_without_parameters_unchanged() {
        assert_eq!(format_endpoint("/api/budgets", 42), "/api/budgets");
    }
}
