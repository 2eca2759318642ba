//! Pricing API 模块
//!
//! `POST /api/pricing/quote` - 结算表单的实时总价 (不落库)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/pricing/quote", post(handler::quote))
}
