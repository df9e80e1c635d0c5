//! The aggregation engine: pure functions that turn the raw ledger into
//! summaries, category breakdowns, trend series, and budget utilization.
//!
//! Every function here takes plain slices and owns no state, so results are
//! always recomputed from the live ledger and never cached. Records that
//! reference a category that no longer exists are dropped from the aggregates
//! and logged, rather than failing the whole computation: given well-formed
//! collections, nothing in this module can return an error.

mod budget_overview;
mod category_summary;
mod summary;
mod trends;

pub use budget_overview::{
    BudgetTier, BudgetWithCategory, DEFAULT_TIER_THRESHOLDS, TierThresholds, budget_overview,
};
pub use category_summary::{CategorySummary, category_summary};
pub use summary::{TransactionSummary, transaction_summary};
pub use trends::{DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS, MonthlyTrend, monthly_trends};
