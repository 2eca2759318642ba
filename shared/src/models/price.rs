//! Price Model

use serde::{Deserialize, Serialize};

/// Price list entry
///
/// `is_item = true` prices apply to item reservations (per unit),
/// `is_item = false` prices are the court service price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Price {
    pub id: i64,
    pub name: String,
    pub cost: f64,
    pub is_item: bool,
    pub created_at: i64,
}

/// Create price payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCreate {
    pub name: String,
    pub cost: f64,
    #[serde(default)]
    pub is_item: bool,
}

/// Update price payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub name: Option<String>,
    pub cost: Option<f64>,
    pub is_item: Option<bool>,
}
