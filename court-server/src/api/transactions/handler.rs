//! Transaction API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{client, discount, price, transaction};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    CreatedResponse, ListResponse, Transaction, TransactionCreate, TransactionUpdate,
};

#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    pub reservation_id: Option<i64>,
}

async fn ensure_refs(
    state: &ServerState,
    client_id: Option<i64>,
    price_id: Option<i64>,
    discount_id: Option<i64>,
) -> AppResult<()> {
    if let Some(id) = client_id
        && client::find_by_id(&state.pool, id).await?.is_none()
    {
        return Err(AppError::new(ErrorCode::ClientNotFound).with_detail("id", id));
    }
    if let Some(id) = price_id
        && price::find_by_id(&state.pool, id).await?.is_none()
    {
        return Err(AppError::new(ErrorCode::PriceNotFound).with_detail("id", id));
    }
    if let Some(id) = discount_id
        && discount::find_by_id(&state.pool, id).await?.is_none()
    {
        return Err(AppError::new(ErrorCode::DiscountNotFound).with_detail("id", id));
    }
    Ok(())
}

/// GET /api/transactions?reservation_id=...
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TransactionQuery>,
) -> AppResult<Json<ListResponse<Transaction>>> {
    let transactions = transaction::find_all(&state.pool, query.reservation_id).await?;
    Ok(Json(ListResponse::new(transactions)))
}

/// GET /api/transactions/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Transaction>> {
    let t = transaction::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TransactionNotFound).with_detail("id", id))?;
    Ok(Json(t))
}

/// POST /api/transactions
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    if !transaction::reservation_exists(&state.pool, payload.reservation_id).await? {
        return Err(AppError::new(ErrorCode::ReservationNotFound)
            .with_detail("id", payload.reservation_id));
    }
    ensure_refs(
        &state,
        Some(payload.client_id),
        Some(payload.price_id),
        payload.discount_id,
    )
    .await?;
    let t = transaction::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(t.id, t.created_at))))
}

/// PUT /api/transactions/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TransactionUpdate>,
) -> AppResult<Json<Transaction>> {
    ensure_refs(&state, payload.client_id, payload.price_id, payload.discount_id).await?;
    let t = transaction::update(&state.pool, id, payload).await?;
    Ok(Json(t))
}

/// DELETE /api/transactions/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = transaction::delete(&state.pool, id).await?;
    if !result {
        return Err(AppError::new(ErrorCode::TransactionNotFound).with_detail("id", id));
    }
    Ok(Json(result))
}
