//! Transaction Model

use serde::{Deserialize, Serialize};

/// Transaction: one charged reservation
///
/// `reservation_id` points to either a court reservation or an item
/// reservation; the price tells which (`is_item`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: i64,
    pub client_id: i64,
    pub reservation_id: i64,
    pub price_id: i64,
    pub discount_id: Option<i64>,
    pub created_at: i64,
}

/// Create transaction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub client_id: i64,
    pub reservation_id: i64,
    pub price_id: i64,
    pub discount_id: Option<i64>,
}

/// Update transaction payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub client_id: Option<i64>,
    pub price_id: Option<i64>,
    pub discount_id: Option<i64>,
}
