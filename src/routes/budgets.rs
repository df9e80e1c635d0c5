//! Handlers for budgets.
//!
//! Listing budgets returns each budget with its spent total, utilization, and
//! tier recomputed from the live ledger on every read. Nothing is cached or
//! stored, so deleting a transaction immediately lowers the spent total.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    DatabaseID, Error,
    aggregation::{BudgetTier, BudgetWithCategory, budget_overview},
    models::{Budget, NewBudget},
    state::BudgetState,
    stores::{BudgetStore, CategoryStore, TransactionStore},
};

/// A budget as returned by the list endpoint, with its computed status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    /// The budget, its category, and the spent total.
    #[serde(flatten)]
    pub overview: BudgetWithCategory,
    /// The spent-to-limit ratio as a percentage, capped at 100.
    pub utilization: f64,
    /// The classification bucket for the (uncapped) utilization.
    pub tier: BudgetTier,
}

/// List all budgets with their spent totals, utilization, and tier.
pub async fn get_budgets<B, C, T>(
    State(state): State<BudgetState<B, C, T>>,
) -> Result<Json<Vec<BudgetStatus>>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    let budgets = state.budget_store.get_all()?;
    let categories = state.category_store.get_all()?;
    let transactions = state.transaction_store.get_all()?;

    let statuses = budget_overview(&budgets, &categories, &transactions)
        .into_iter()
        .map(|overview| BudgetStatus {
            utilization: overview.capped_utilization(),
            tier: state.tier_thresholds.tier(overview.utilization()),
            overview,
        })
        .collect();

    Ok(Json(statuses))
}

/// Create a new budget.
pub async fn create_budget<B, C, T>(
    State(mut state): State<BudgetState<B, C, T>>,
    Json(new_budget): Json<NewBudget>,
) -> Result<(StatusCode, Json<Budget>), Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    let budget = state.budget_store.create(new_budget)?;

    Ok((StatusCode::CREATED, Json(budget)))
}

/// Replace the budget with `budget_id`.
pub async fn update_budget<B, C, T>(
    State(mut state): State<BudgetState<B, C, T>>,
    Path(budget_id): Path<DatabaseID>,
    Json(new_budget): Json<NewBudget>,
) -> Result<Json<Budget>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    state.budget_store.update(budget_id, new_budget).map(Json)
}

/// Delete the budget with `budget_id`.
pub async fn delete_budget<B, C, T>(
    State(mut state): State<BudgetState<B, C, T>>,
    Path(budget_id): Path<DatabaseID>,
) -> Result<StatusCode, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    state.budget_store.delete(budget_id)?;

    Ok(StatusCode::NO_CONTENT)
}
