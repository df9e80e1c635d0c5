//! Implements the structs that hold the state of the REST server.
//!
//! Each route family extracts only the narrow substate it needs via
//! [FromRef], so handlers stay decoupled from the full application state.

use axum::extract::FromRef;

use crate::{
    aggregation::{DEFAULT_TIER_THRESHOLDS, TierThresholds},
    auth::ChallengeAuthenticator,
    stores::{BudgetStore, CategoryStore, GoalStore, TransactionStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<C, T, B, G, A>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
    G: GoalStore + Clone + Send + Sync,
    A: ChallengeAuthenticator + Clone + Send + Sync,
{
    /// The store for managing [categories](crate::models::Category).
    pub category_store: C,
    /// The store for managing [transactions](crate::models::Transaction).
    pub transaction_store: T,
    /// The store for managing [budgets](crate::models::Budget).
    pub budget_store: B,
    /// The store for managing [goals](crate::models::Goal).
    pub goal_store: G,
    /// The capability for delegating authentication to the external webhook.
    pub authenticator: A,
    /// The canonical timezone (e.g., "Pacific/Auckland") used for date
    /// bucketing and future-date validation.
    pub timezone: String,
    /// The utilization percentages at which budgets change tier.
    pub tier_thresholds: TierThresholds,
}

impl<C, T, B, G, A> AppState<C, T, B, G, A>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
    G: GoalStore + Clone + Send + Sync,
    A: ChallengeAuthenticator + Clone + Send + Sync,
{
    /// Create a new [AppState] with the default budget tier thresholds.
    pub fn new(
        category_store: C,
        transaction_store: T,
        budget_store: B,
        goal_store: G,
        authenticator: A,
        timezone: &str,
    ) -> Self {
        Self {
            category_store,
            transaction_store,
            budget_store,
            goal_store,
            authenticator,
            timezone: timezone.to_string(),
            tier_thresholds: DEFAULT_TIER_THRESHOLDS,
        }
    }
}

/// The state needed to manage categories.
#[derive(Debug, Clone)]
pub struct CategoryState<C> {
    /// The store for managing [categories](crate::models::Category).
    pub category_store: C,
}

impl<C, T, B, G, A> FromRef<AppState<C, T, B, G, A>> for CategoryState<C>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
    G: GoalStore + Clone + Send + Sync,
    A: ChallengeAuthenticator + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<C, T, B, G, A>) -> Self {
        Self {
            category_store: state.category_store.clone(),
        }
    }
}

/// The state needed to manage transactions.
#[derive(Debug, Clone)]
pub struct TransactionState<T> {
    /// The store for managing [transactions](crate::models::Transaction).
    pub transaction_store: T,
    /// The canonical timezone used to validate transaction dates.
    pub timezone: String,
}

impl<C, T, B, G, A> FromRef<AppState<C, T, B, G, A>> for TransactionState<T>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
    G: GoalStore + Clone + Send + Sync,
    A: ChallengeAuthenticator + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<C, T, B, G, A>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            timezone: state.timezone.clone(),
        }
    }
}

/// The state needed to manage budgets and compute their utilization.
#[derive(Debug, Clone)]
pub struct BudgetState<B, C, T> {
    /// The store for managing [budgets](crate::models::Budget).
    pub budget_store: B,
    /// The store for looking up budget categories.
    pub category_store: C,
    /// The store for summing spending against each budget.
    pub transaction_store: T,
    /// The utilization percentages at which budgets change tier.
    pub tier_thresholds: TierThresholds,
}

impl<C, T, B, G, A> FromRef<AppState<C, T, B, G, A>> for BudgetState<B, C, T>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
    G: GoalStore + Clone + Send + Sync,
    A: ChallengeAuthenticator + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<C, T, B, G, A>) -> Self {
        Self {
            budget_store: state.budget_store.clone(),
            category_store: state.category_store.clone(),
            transaction_store: state.transaction_store.clone(),
            tier_thresholds: state.tier_thresholds,
        }
    }
}

/// The state needed to manage goals.
#[derive(Debug, Clone)]
pub struct GoalState<G> {
    /// The store for managing [goals](crate::models::Goal).
    pub goal_store: G,
}

impl<C, T, B, G, A> FromRef<AppState<C, T, B, G, A>> for GoalState<G>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
    G: GoalStore + Clone + Send + Sync,
    A: ChallengeAuthenticator + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<C, T, B, G, A>) -> Self {
        Self {
            goal_store: state.goal_store.clone(),
        }
    }
}

/// The state needed for the report endpoints.
#[derive(Debug, Clone)]
pub struct ReportState<C, T> {
    /// The store for looking up categories in breakdowns.
    pub category_store: C,
    /// The store for reading the transaction ledger.
    pub transaction_store: T,
    /// The canonical timezone used for month bucketing.
    pub timezone: String,
}

impl<C, T, B, G, A> FromRef<AppState<C, T, B, G, A>> for ReportState<C, T>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
    G: GoalStore + Clone + Send + Sync,
    A: ChallengeAuthenticator + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<C, T, B, G, A>) -> Self {
        Self {
            category_store: state.category_store.clone(),
            transaction_store: state.transaction_store.clone(),
            timezone: state.timezone.clone(),
        }
    }
}

/// The state needed for the authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthState<A> {
    /// The capability for delegating authentication to the external webhook.
    pub authenticator: A,
}

impl<C, T, B, G, A> FromRef<AppState<C, T, B, G, A>> for AuthState<A>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    B: BudgetStore + Clone + Send + Sync,
    G: GoalStore + Clone + Send + Sync,
    A: ChallengeAuthenticator + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<C, T, B, G, A>) -> Self {
        Self {
            authenticator: state.authenticator.clone(),
        }
    }
}
