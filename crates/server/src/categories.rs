//! Categories API endpoints.

use api_types::dashboard::Deleted;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Category, CategoryChanges, EngineError, NewCategory};

use crate::{ServerError, not_found, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Category>>, ServerError> {
    Ok(Json(state.engine.list_categories().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ServerError> {
    let category = state
        .engine
        .category(id)
        .await?
        .ok_or_else(|| not_found("category", id))?;
    Ok(Json(category))
}

pub async fn by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<Category>, ServerError> {
    let category = state
        .engine
        .category_by_name(&name)
        .await?
        .ok_or_else(|| ServerError::Engine(EngineError::KeyNotFound(format!("category {name}"))))?;
    Ok(Json(category))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ServerError> {
    let category = state.engine.create_category(&payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryChanges>,
) -> Result<Json<Category>, ServerError> {
    Ok(Json(state.engine.update_category(id, &payload).await?))
}

/// Built-in categories answer 403.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ServerError> {
    state.engine.delete_category(id).await?;
    Ok(Json(Deleted { deleted: true }))
}
