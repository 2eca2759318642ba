//! Court Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::court_reservation;
use crate::reservations;
use crate::utils::time::{day_end_millis, day_start_millis, parse_date};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    CheckoutRequest, CheckoutResponse, CourtReservation, CourtReservationCreate,
    CourtReservationUpdate, CreatedResponse, ListResponse,
};

#[derive(Debug, Default, Deserialize)]
pub struct ReservationQuery {
    /// Only reservations starting on this day (YYYY-MM-DD)
    pub date: Option<String>,
}

/// GET /api/court-reservations?date=YYYY-MM-DD
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<ListResponse<CourtReservation>>> {
    let reservations = match query.date.as_deref() {
        Some(date) => {
            let day = parse_date(date)?;
            court_reservation::find_starting_between(
                &state.pool,
                day_start_millis(day),
                day_end_millis(day),
            )
            .await?
        }
        None => court_reservation::find_all(&state.pool).await?,
    };
    Ok(Json(ListResponse::new(reservations)))
}

/// GET /api/court-reservations/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CourtReservation>> {
    let r = court_reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound).with_detail("id", id))?;
    Ok(Json(r))
}

/// POST /api/court-reservations - 创建场地预约
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CourtReservationCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let r = reservations::create_reservation(&state.pool, state.hours(), payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(r.id, r.created_at))))
}

/// PUT /api/court-reservations/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CourtReservationUpdate>,
) -> AppResult<Json<CourtReservation>> {
    let r = reservations::update_reservation(&state.pool, state.hours(), id, payload).await?;
    Ok(Json(r))
}

/// DELETE /api/court-reservations/:id - 删除预约及其物品预约、交易
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = reservations::remove_reservation(&state.pool, id).await?;
    Ok(Json(result))
}

/// POST /api/court-reservations/:id/checkout - 结算
pub async fn checkout(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let result = reservations::checkout(&state.pool, id, payload).await?;
    Ok(Json(result))
}
