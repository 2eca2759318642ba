//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee entity
///
/// Teachers (`is_teacher`) can be attached to court reservations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub address: String,
    pub phone: String,
    /// Birth date (YYYY-MM-DD)
    pub birthdate: String,
    pub email: String,
    pub bank_account: String,
    /// Monthly payroll
    pub payroll: f64,
    pub is_teacher: bool,
    pub created_at: i64,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub surname: String,
    pub address: String,
    pub phone: String,
    pub birthdate: String,
    pub email: String,
    pub bank_account: String,
    pub payroll: f64,
    #[serde(default)]
    pub is_teacher: bool,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<String>,
    pub email: Option<String>,
    pub bank_account: Option<String>,
    pub payroll: Option<f64>,
    pub is_teacher: Option<bool>,
}
