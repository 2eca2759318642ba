//! Price API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::price;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_amount, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{CreatedResponse, ListResponse, Price, PriceCreate, PriceUpdate};

#[derive(Debug, Default, Deserialize)]
pub struct PriceQuery {
    /// `true`: item prices, `false`: court service prices
    pub is_item: Option<bool>,
}

/// GET /api/prices?is_item=true|false
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PriceQuery>,
) -> AppResult<Json<ListResponse<Price>>> {
    let prices = price::find_all(&state.pool, query.is_item).await?;
    Ok(Json(ListResponse::new(prices)))
}

/// GET /api/prices/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Price>> {
    let p = price::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PriceNotFound).with_detail("id", id))?;
    Ok(Json(p))
}

/// POST /api/prices
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PriceCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_amount(payload.cost, "cost")?;
    let p = price::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(p.id, p.created_at))))
}

/// PUT /api/prices/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PriceUpdate>,
) -> AppResult<Json<Price>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    if let Some(cost) = payload.cost {
        validate_amount(cost, "cost")?;
    }
    let p = price::update(&state.pool, id, payload).await?;
    Ok(Json(p))
}

/// DELETE /api/prices/:id - 删除价格 (被引用时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = price::delete(&state.pool, id).await?;
    if !result {
        return Err(AppError::new(ErrorCode::PriceNotFound).with_detail("id", id));
    }
    Ok(Json(result))
}
