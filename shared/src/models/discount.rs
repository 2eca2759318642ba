//! Discount Model

use serde::{Deserialize, Serialize};

/// Discount entity
///
/// `value` is a percentage (20 = 20%) when `is_percentage`, otherwise a flat amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Discount {
    pub id: i64,
    pub name: String,
    pub is_percentage: bool,
    pub value: f64,
    pub created_at: i64,
}

/// Create discount payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCreate {
    pub name: String,
    pub is_percentage: bool,
    pub value: f64,
}

/// Update discount payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscountUpdate {
    pub name: Option<String>,
    pub is_percentage: Option<bool>,
    pub value: Option<f64>,
}
