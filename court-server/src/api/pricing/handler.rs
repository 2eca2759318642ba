//! Pricing API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::reservations;
use crate::utils::AppResult;
use shared::models::{QuoteRequest, QuoteResponse};

/// POST /api/pricing/quote
pub async fn quote(
    State(state): State<ServerState>,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<QuoteResponse>> {
    let result = reservations::quote(&state.pool, payload).await?;
    Ok(Json(result))
}
