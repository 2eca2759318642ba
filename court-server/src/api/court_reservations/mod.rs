//! Court Reservation API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/court-reservations | GET | 列表 (`?date=YYYY-MM-DD`) |
//! | /api/court-reservations | POST | 创建 (重叠时 409) |
//! | /api/court-reservations/{id} | GET / PUT / DELETE | 单个预约 (删除会级联) |
//! | /api/court-reservations/{id}/checkout | POST | 结算 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/court-reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/checkout", post(handler::checkout))
}
