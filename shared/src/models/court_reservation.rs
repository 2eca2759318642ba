//! Court Reservation Model

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Court reservation (场地预约)
///
/// `start` / `end` are Unix millis; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CourtReservation {
    pub id: i64,
    pub court_id: i64,
    /// Teacher (employee with `is_teacher`)
    pub teacher_id: Option<i64>,
    #[cfg_attr(feature = "db", sqlx(rename = "start_at"))]
    pub start: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "end_at"))]
    pub end: i64,
    pub note: Option<String>,
    pub created_at: i64,
}

impl CourtReservation {
    /// Whether `[start, end)` intersects `[other_start, other_end)`
    pub fn overlaps(&self, other_start: i64, other_end: i64) -> bool {
        self.start < other_end && other_start < self.end
    }
}

/// Create court reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtReservationCreate {
    pub court_id: i64,
    pub teacher_id: Option<i64>,
    pub start: i64,
    pub end: i64,
    pub note: Option<String>,
}

/// Update court reservation payload
///
/// `teacher_id` and `note` can be cleared: an absent field keeps the stored
/// value, `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourtReservationUpdate {
    pub court_id: Option<i64>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub teacher_id: Option<Option<i64>>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<Option<String>>,
}

/// Line of the checkout form
///
/// Any field may be missing while the form is being edited; incomplete
/// lines are ignored by pricing and checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemLine {
    pub item_id: Option<i64>,
    pub price_id: Option<i64>,
    pub count: Option<i64>,
}

impl ItemLine {
    /// `(item_id, price_id, count)` when every field is filled in and `count > 0`
    pub fn complete(&self) -> Option<(i64, i64, i64)> {
        match (self.item_id, self.price_id, self.count) {
            (Some(item_id), Some(price_id), Some(count)) if count > 0 => {
                Some((item_id, price_id, count))
            }
            _ => None,
        }
    }
}

/// Checkout payload: turns a pending reservation into transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub client_id: i64,
    pub teacher_id: Option<i64>,
    /// Court service price (`is_item = false`)
    pub price_id: i64,
    pub discount_id: Option<i64>,
    #[serde(default)]
    pub item_reservations: Vec<ItemLine>,
}

/// Checkout result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub reservation: CourtReservation,
    pub item_reservations: Vec<super::ItemReservation>,
    pub transactions: Vec<super::Transaction>,
    pub total: f64,
}

/// Draft pricing of the checkout form (nothing is persisted)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub price_id: Option<i64>,
    pub discount_id: Option<i64>,
    #[serde(default)]
    pub item_reservations: Vec<ItemLine>,
}

/// Draft pricing result
///
/// `total` is `None` until a service price is chosen; `lines` holds the
/// per-line cost (or `None` for lines without a known item price).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub total: Option<f64>,
    pub formatted_total: Option<String>,
    pub lines: Vec<Option<f64>>,
}
