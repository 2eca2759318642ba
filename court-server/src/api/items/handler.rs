//! Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::item;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{CreatedResponse, Item, ItemCreate, ItemUpdate, ListResponse};

/// GET /api/items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ListResponse<Item>>> {
    let items = item::find_all(&state.pool).await?;
    Ok(Json(ListResponse::new(items)))
}

/// GET /api/items/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Item>> {
    let i = item::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound).with_detail("id", id))?;
    Ok(Json(i))
}

/// POST /api/items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ItemCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    let i = item::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(i.id, i.created_at))))
}

/// PUT /api/items/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<Json<Item>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    let i = item::update(&state.pool, id, payload).await?;
    Ok(Json(i))
}

/// DELETE /api/items/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = item::delete(&state.pool, id).await?;
    if !result {
        return Err(AppError::new(ErrorCode::ItemNotFound).with_detail("id", id));
    }
    Ok(Json(result))
}
