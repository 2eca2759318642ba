//! Discount API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::discount;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_amount, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{CreatedResponse, Discount, DiscountCreate, DiscountUpdate, ListResponse};

/// Percentages must stay within 0..=100
fn validate_value(is_percentage: bool, value: f64) -> AppResult<()> {
    validate_amount(value, "value")?;
    if is_percentage && value > 100.0 {
        return Err(AppError::new(ErrorCode::ValueOutOfRange)
            .with_detail("field", "value")
            .with_detail("max", 100));
    }
    Ok(())
}

/// GET /api/discounts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ListResponse<Discount>>> {
    let discounts = discount::find_all(&state.pool).await?;
    Ok(Json(ListResponse::new(discounts)))
}

/// GET /api/discounts/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Discount>> {
    let d = discount::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DiscountNotFound).with_detail("id", id))?;
    Ok(Json(d))
}

/// POST /api/discounts
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiscountCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_value(payload.is_percentage, payload.value)?;
    let d = discount::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(d.id, d.created_at))))
}

/// PUT /api/discounts/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiscountUpdate>,
) -> AppResult<Json<Discount>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    if payload.is_percentage.is_some() || payload.value.is_some() {
        let current = discount::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::DiscountNotFound).with_detail("id", id))?;
        validate_value(
            payload.is_percentage.unwrap_or(current.is_percentage),
            payload.value.unwrap_or(current.value),
        )?;
    }
    let d = discount::update(&state.pool, id, payload).await?;
    Ok(Json(d))
}

/// DELETE /api/discounts/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = discount::delete(&state.pool, id).await?;
    if !result {
        return Err(AppError::new(ErrorCode::DiscountNotFound).with_detail("id", id));
    }
    Ok(Json(result))
}
