//! Transaction endpoints.

use api_types::dashboard::Deleted;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{NewTransaction, Transaction, TransactionChanges};

use crate::{ServerError, month_param, not_found, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Transaction>>, ServerError> {
    Ok(Json(state.engine.list_transactions().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, ServerError> {
    let transaction = state
        .engine
        .transaction(id)
        .await?
        .ok_or_else(|| not_found("transaction", id))?;
    Ok(Json(transaction))
}

pub async fn by_month(
    State(state): State<ServerState>,
    Path(month): Path<String>,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    let month = month_param(&month)?;
    Ok(Json(state.engine.transactions_by_month(month).await?))
}

pub async fn by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    Ok(Json(state.engine.transactions_by_category(&category).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    let transaction = state.engine.create_transaction(&payload).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TransactionChanges>,
) -> Result<Json<Transaction>, ServerError> {
    Ok(Json(state.engine.update_transaction(id, &payload).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_transaction(id).await?;
    Ok(Json(Deleted { deleted: true }))
}
