//! Budget endpoints, including the monthly summary and the `spent` sync.

use api_types::dashboard::{Deleted, SpentUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Budget, BudgetChanges, BudgetSummary, Money, NewBudget};

use crate::{ServerError, month_param, not_found, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Budget>>, ServerError> {
    Ok(Json(state.engine.list_budgets().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Budget>, ServerError> {
    let budget = state
        .engine
        .budget(id)
        .await?
        .ok_or_else(|| not_found("budget", id))?;
    Ok(Json(budget))
}

pub async fn by_month(
    State(state): State<ServerState>,
    Path(month): Path<String>,
) -> Result<Json<Vec<Budget>>, ServerError> {
    let month = month_param(&month)?;
    Ok(Json(state.engine.budgets_by_month(month).await?))
}

pub async fn summary(
    State(state): State<ServerState>,
    Path(month): Path<String>,
) -> Result<Json<BudgetSummary>, ServerError> {
    let month = month_param(&month)?;
    Ok(Json(state.engine.budget_summary(month).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<NewBudget>,
) -> Result<(StatusCode, Json<Budget>), ServerError> {
    let budget = state.engine.create_budget(&payload).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BudgetChanges>,
) -> Result<Json<Budget>, ServerError> {
    Ok(Json(state.engine.update_budget(id, &payload).await?))
}

/// 404 when the month has no budget for the category.
pub async fn update_spent(
    State(state): State<ServerState>,
    Json(payload): Json<SpentUpdate>,
) -> Result<Json<Budget>, ServerError> {
    let month = month_param(&payload.month)?;
    let amount = Money::try_from(&payload.amount)?;

    let budget = state
        .engine
        .update_spent(&payload.category, month, amount)
        .await?
        .ok_or_else(|| {
            ServerError::Engine(engine::EngineError::KeyNotFound(format!(
                "budget for {} in {month}",
                payload.category
            )))
        })?;
    Ok(Json(budget))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_budget(id).await?;
    Ok(Json(Deleted { deleted: true }))
}
