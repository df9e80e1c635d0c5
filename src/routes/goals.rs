//! Handlers for savings goals, including depositing funds toward a goal.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    DatabaseID, Error,
    models::{Goal, NewGoal},
    state::GoalState,
    stores::GoalStore,
};

/// A goal as returned by the API, with its computed progress percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalDetails {
    /// The goal itself.
    #[serde(flatten)]
    pub goal: Goal,
    /// How far along the goal is, as a whole-number percentage capped at 100.
    pub progress: f64,
}

impl From<Goal> for GoalDetails {
    fn from(goal: Goal) -> Self {
        Self {
            progress: goal.progress_percent(),
            goal,
        }
    }
}

/// The payload for depositing funds toward a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundsDeposit {
    /// The amount to add to the goal's current amount. Must be greater than
    /// zero.
    pub amount: f64,
}

/// List all goals with their progress.
pub async fn get_goals<G>(
    State(state): State<GoalState<G>>,
) -> Result<Json<Vec<GoalDetails>>, Error>
where
    G: GoalStore + Clone + Send + Sync,
{
    let goals = state.goal_store.get_all()?;

    Ok(Json(goals.into_iter().map(GoalDetails::from).collect()))
}

/// Create a new goal.
pub async fn create_goal<G>(
    State(mut state): State<GoalState<G>>,
    Json(new_goal): Json<NewGoal>,
) -> Result<(StatusCode, Json<GoalDetails>), Error>
where
    G: GoalStore + Clone + Send + Sync,
{
    let goal = state.goal_store.create(new_goal)?;

    Ok((StatusCode::CREATED, Json(GoalDetails::from(goal))))
}

/// Replace the goal with `goal_id`.
pub async fn update_goal<G>(
    State(mut state): State<GoalState<G>>,
    Path(goal_id): Path<DatabaseID>,
    Json(new_goal): Json<NewGoal>,
) -> Result<Json<GoalDetails>, Error>
where
    G: GoalStore + Clone + Send + Sync,
{
    state
        .goal_store
        .update(goal_id, new_goal)
        .map(|goal| Json(GoalDetails::from(goal)))
}

/// Delete the goal with `goal_id`.
pub async fn delete_goal<G>(
    State(mut state): State<GoalState<G>>,
    Path(goal_id): Path<DatabaseID>,
) -> Result<StatusCode, Error>
where
    G: GoalStore + Clone + Send + Sync,
{
    state.goal_store.delete(goal_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Add funds to the goal with `goal_id` and return the updated goal.
pub async fn add_funds_to_goal<G>(
    State(mut state): State<GoalState<G>>,
    Path(goal_id): Path<DatabaseID>,
    Json(deposit): Json<FundsDeposit>,
) -> Result<Json<GoalDetails>, Error>
where
    G: GoalStore + Clone + Send + Sync,
{
    state
        .goal_store
        .add_funds(goal_id, deposit.amount)
        .map(|goal| Json(GoalDetails::from(goal)))
}
