//! Court Model

use serde::{Deserialize, Serialize};

/// Court entity (场地)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Court {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

/// Create court payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtCreate {
    pub name: String,
}

/// Update court payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourtUpdate {
    pub name: Option<String>,
}
