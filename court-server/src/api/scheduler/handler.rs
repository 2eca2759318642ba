//! Scheduler API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{court, court_reservation};
use crate::utils::time::{parse_date, today};
use crate::utils::{AppError, AppResult};
use shared::scheduler::{SchedulerGrid, schedule_day};

#[derive(Debug, Default, Deserialize)]
pub struct SchedulerQuery {
    /// Day to render (default: today)
    pub date: Option<String>,
}

/// GET /api/scheduler?date=YYYY-MM-DD
pub async fn day_grid(
    State(state): State<ServerState>,
    Query(query): Query<SchedulerQuery>,
) -> AppResult<Json<SchedulerGrid>> {
    let day = match query.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => today(),
    };
    let hours = state.hours();

    let courts = court::find_all_for_grid(&state.pool).await?;
    let reservations = court_reservation::find_starting_between(
        &state.pool,
        hours.opening(day),
        hours.closing(day),
    )
    .await?;

    // 写入时已校验营业时间; 这里失败说明配置的营业时间被改过
    let grid = schedule_day(courts, &reservations, day, hours).map_err(|e| {
        tracing::error!(error = %e, %day, "Failed to build scheduler grid");
        AppError::internal(e.to_string())
    })?;

    Ok(Json(grid))
}
