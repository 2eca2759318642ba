//! Item Reservation Model

use serde::{Deserialize, Serialize};

/// Item rented together with a court reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ItemReservation {
    pub id: i64,
    pub item_id: i64,
    /// Item price (`is_item = true`)
    pub price_id: i64,
    pub count: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "start_at"))]
    pub start: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "end_at"))]
    pub end: i64,
    pub court_reservation_id: i64,
    pub created_at: i64,
}

/// Create item reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReservationCreate {
    pub item_id: i64,
    pub price_id: i64,
    pub count: i64,
    /// Copied from the court reservation on create
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub end: i64,
    pub court_reservation_id: i64,
}

/// Update item reservation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemReservationUpdate {
    pub item_id: Option<i64>,
    pub price_id: Option<i64>,
    pub count: Option<i64>,
}
