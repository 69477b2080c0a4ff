//! Savings goal endpoints.

use api_types::dashboard::{ContributionNew, Deleted};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{GoalsSummary, Money, NewSavingsGoal, SavingsGoal, SavingsGoalChanges};

use crate::{ServerError, not_found, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<SavingsGoal>>, ServerError> {
    Ok(Json(state.engine.list_savings_goals().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<SavingsGoal>, ServerError> {
    let goal = state
        .engine
        .savings_goal(id)
        .await?
        .ok_or_else(|| not_found("savings goal", id))?;
    Ok(Json(goal))
}

pub async fn summary(State(state): State<ServerState>) -> Result<Json<GoalsSummary>, ServerError> {
    Ok(Json(state.engine.goals_summary().await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<NewSavingsGoal>,
) -> Result<(StatusCode, Json<SavingsGoal>), ServerError> {
    let goal = state.engine.create_savings_goal(&payload).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SavingsGoalChanges>,
) -> Result<Json<SavingsGoal>, ServerError> {
    Ok(Json(state.engine.update_savings_goal(id, &payload).await?))
}

pub async fn contribute(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ContributionNew>,
) -> Result<Json<SavingsGoal>, ServerError> {
    let amount = Money::try_from(&payload.amount)?;
    Ok(Json(state.engine.add_contribution(id, amount).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_savings_goal(id).await?;
    Ok(Json(Deleted { deleted: true }))
}
