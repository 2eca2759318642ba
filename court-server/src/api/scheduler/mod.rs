//! Scheduler API 模块
//!
//! `GET /api/scheduler?date=YYYY-MM-DD` - 某天的 场地 × 时间段 网格

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/scheduler", get(handler::day_grid))
}
