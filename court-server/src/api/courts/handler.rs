//! Court API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::court;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Court, CourtCreate, CourtUpdate, CreatedResponse, ListResponse};

/// GET /api/courts - 获取所有场地
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ListResponse<Court>>> {
    let courts = court::find_all(&state.pool).await?;
    Ok(Json(ListResponse::new(courts)))
}

/// GET /api/courts/:id - 获取单个场地
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Court>> {
    let c = court::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CourtNotFound).with_detail("id", id))?;
    Ok(Json(c))
}

/// POST /api/courts - 创建场地
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CourtCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let c = court::create(&state.pool, payload).await?;
    tracing::info!(id = c.id, name = %c.name, "Court created");

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(c.id, c.created_at))))
}

/// PUT /api/courts/:id - 更新场地
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CourtUpdate>,
) -> AppResult<Json<Court>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    let c = court::update(&state.pool, id, payload).await?;
    Ok(Json(c))
}

/// DELETE /api/courts/:id - 删除场地 (有预约时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = court::delete(&state.pool, id).await?;
    if !result {
        return Err(AppError::new(ErrorCode::CourtNotFound).with_detail("id", id));
    }
    tracing::info!(id, "Court deleted");
    Ok(Json(result))
}
