//! Client Model

use serde::{Deserialize, Serialize};

/// Client entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub address: String,
    pub phone: String,
    /// Birth date (YYYY-MM-DD)
    pub birthdate: String,
    pub email: Option<String>,
    /// Regular member of the club
    pub is_permanent: bool,
    pub created_at: i64,
}

/// Create client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    pub surname: String,
    pub address: String,
    pub phone: String,
    pub birthdate: String,
    pub email: Option<String>,
    #[serde(default)]
    pub is_permanent: bool,
}

/// Update client payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<String>,
    pub email: Option<String>,
    pub is_permanent: Option<bool>,
}
