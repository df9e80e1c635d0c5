//! Handlers for the read-only report endpoints.
//!
//! Reports are recomputed from the full ledger on every request; nothing is
//! cached between reads.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error, local_today,
    aggregation::{
        CategorySummary, DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS, MonthlyTrend, TransactionSummary,
        category_summary, monthly_trends, transaction_summary,
    },
    models::TransactionType,
    state::ReportState,
    stores::{CategoryStore, TransactionStore},
};

/// Report the all-time income, expense, and balance totals.
pub async fn get_summary<C, T>(
    State(state): State<ReportState<C, T>>,
) -> Result<Json<TransactionSummary>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    let transactions = state.transaction_store.get_all()?;

    Ok(Json(transaction_summary(&transactions)))
}

/// The query parameters for the category breakdown report.
#[derive(Debug, Deserialize)]
pub struct CategoryReportParams {
    /// Which transaction type to break down, e.g. `?kind=expense`.
    pub kind: TransactionType,
}

/// Report per-category totals and percentage shares for one transaction type.
pub async fn get_category_breakdown<C, T>(
    State(state): State<ReportState<C, T>>,
    Query(params): Query<CategoryReportParams>,
) -> Result<Json<Vec<CategorySummary>>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    let categories = state.category_store.get_all()?;
    let transactions = state.transaction_store.get_all()?;

    Ok(Json(category_summary(
        &transactions,
        &categories,
        params.kind,
    )))
}

/// The query parameters for the monthly trends report.
#[derive(Debug, Deserialize)]
pub struct TrendParams {
    /// How many months to report, ending with the current month. Defaults to
    /// [DEFAULT_TREND_MONTHS]; at most [MAX_TREND_MONTHS].
    pub months: Option<u32>,
}

/// Report income and expense totals per calendar month.
///
/// The window ends with the current month in the server's configured
/// timezone.
///
/// # Errors
/// This function will return an [Error::InvalidTrendMonths] if the requested
/// window is zero or larger than [MAX_TREND_MONTHS].
pub async fn get_trends<C, T>(
    State(state): State<ReportState<C, T>>,
    Query(params): Query<TrendParams>,
) -> Result<Json<Vec<MonthlyTrend>>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    let months = params.months.unwrap_or(DEFAULT_TREND_MONTHS);
    if !(1..=MAX_TREND_MONTHS).contains(&months) {
        return Err(Error::InvalidTrendMonths(months));
    }

    let transactions = state.transaction_store.get_all()?;
    let today = local_today(&state.timezone)?;

    Ok(Json(monthly_trends(&transactions, months, today)))
}
