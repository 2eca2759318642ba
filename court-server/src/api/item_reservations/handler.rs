//! Item Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{court_reservation, item, item_reservation, price};
use crate::utils::validation::validate_item_count;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    CreatedResponse, ItemReservation, ItemReservationCreate, ItemReservationUpdate, ListResponse,
};

#[derive(Debug, Default, Deserialize)]
pub struct ItemReservationQuery {
    pub court_reservation_id: Option<i64>,
}

/// Item price by id, rejecting service prices
async fn ensure_item_price(state: &ServerState, price_id: i64) -> AppResult<()> {
    let p = price::find_by_id(&state.pool, price_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PriceNotFound).with_detail("id", price_id))?;
    if !p.is_item {
        return Err(AppError::new(ErrorCode::PriceKindMismatch).with_detail("id", price_id));
    }
    Ok(())
}

async fn ensure_item(state: &ServerState, item_id: i64) -> AppResult<()> {
    if item::find_by_id(&state.pool, item_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::ItemNotFound).with_detail("id", item_id));
    }
    Ok(())
}

/// GET /api/item-reservations?court_reservation_id=...
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ItemReservationQuery>,
) -> AppResult<Json<ListResponse<ItemReservation>>> {
    let reservations = item_reservation::find_all(&state.pool, query.court_reservation_id).await?;
    Ok(Json(ListResponse::new(reservations)))
}

/// GET /api/item-reservations/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ItemReservation>> {
    let r = item_reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ItemReservationNotFound).with_detail("id", id))?;
    Ok(Json(r))
}

/// POST /api/item-reservations
///
/// The window always follows the parent court reservation.
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<ItemReservationCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    validate_item_count(payload.count, "count")?;
    let parent = court_reservation::find_by_id(&state.pool, payload.court_reservation_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::ReservationNotFound)
                .with_detail("id", payload.court_reservation_id)
        })?;
    ensure_item(&state, payload.item_id).await?;
    ensure_item_price(&state, payload.price_id).await?;

    payload.start = parent.start;
    payload.end = parent.end;

    let r = item_reservation::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(r.id, r.created_at))))
}

/// PUT /api/item-reservations/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ItemReservationUpdate>,
) -> AppResult<Json<ItemReservation>> {
    if let Some(count) = payload.count {
        validate_item_count(count, "count")?;
    }
    if let Some(item_id) = payload.item_id {
        ensure_item(&state, item_id).await?;
    }
    if let Some(price_id) = payload.price_id {
        ensure_item_price(&state, price_id).await?;
    }
    let r = item_reservation::update(&state.pool, id, payload).await?;
    Ok(Json(r))
}

/// DELETE /api/item-reservations/:id - 删除物品预约及其交易
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = item_reservation::delete(&state.pool, id).await?;
    if !result {
        return Err(AppError::new(ErrorCode::ItemReservationNotFound).with_detail("id", id));
    }
    Ok(Json(result))
}
