//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::time::validate_birthdate;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, employee_birthdate_range, validate_amount,
    validate_email, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{CreatedResponse, Employee, EmployeeCreate, EmployeeUpdate, ListResponse};

#[derive(Debug, Default, Deserialize)]
pub struct EmployeeQuery {
    /// Only employees that can teach
    #[serde(default)]
    pub teachers_only: bool,
}

fn validate_create(payload: &EmployeeCreate) -> AppResult<()> {
    let (from, to) = employee_birthdate_range();
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.surname, "surname", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_birthdate(&payload.birthdate, "birthdate", from, to)?;
    validate_email(&payload.email, "email")?;
    validate_required_text(&payload.bank_account, "bank_account", MAX_SHORT_TEXT_LEN)?;
    validate_amount(payload.payroll, "payroll")?;
    Ok(())
}

fn validate_update(payload: &EmployeeUpdate) -> AppResult<()> {
    let (from, to) = employee_birthdate_range();
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.surname, "surname", MAX_NAME_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.bank_account, "bank_account", MAX_SHORT_TEXT_LEN)?;
    if let Some(birthdate) = &payload.birthdate {
        validate_birthdate(birthdate, "birthdate", from, to)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email, "email")?;
    }
    if let Some(payroll) = payload.payroll {
        validate_amount(payroll, "payroll")?;
    }
    Ok(())
}

/// GET /api/employees?teachers_only=true - 获取员工 (可只看教练)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<ListResponse<Employee>>> {
    let employees = employee::find_all(&state.pool, query.teachers_only).await?;
    Ok(Json(ListResponse::new(employees)))
}

/// GET /api/employees/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let e = employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id))?;
    Ok(Json(e))
}

/// POST /api/employees - 创建员工
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    validate_create(&payload)?;
    let e = employee::create(&state.pool, payload).await?;
    tracing::info!(id = e.id, is_teacher = e.is_teacher, "Employee created");
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(e.id, e.created_at))))
}

/// PUT /api/employees/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    validate_update(&payload)?;
    let e = employee::update(&state.pool, id, payload).await?;
    Ok(Json(e))
}

/// DELETE /api/employees/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = employee::delete(&state.pool, id).await?;
    if !result {
        return Err(AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id));
    }
    Ok(Json(result))
}
