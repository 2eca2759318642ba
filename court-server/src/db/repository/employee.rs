//! Employee Repository

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use sqlx::SqlitePool;

const EMPLOYEE_SELECT: &str = "SELECT id, name, surname, address, phone, birthdate, email, bank_account, payroll, is_teacher, created_at FROM employee";

/// All employees, or only teachers
pub async fn find_all(pool: &SqlitePool, teachers_only: bool) -> RepoResult<Vec<Employee>> {
    let sql = if teachers_only {
        format!("{EMPLOYEE_SELECT} WHERE is_teacher = 1 ORDER BY created_at DESC, id DESC")
    } else {
        format!("{EMPLOYEE_SELECT} ORDER BY created_at DESC, id DESC")
    };
    let employees = sqlx::query_as::<_, Employee>(&sql).fetch_all(pool).await?;
    Ok(employees)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE id = ?");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO employee (id, name, surname, address, phone, birthdate, email, bank_account, payroll, is_teacher, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.surname)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.birthdate)
    .bind(&data.email)
    .bind(&data.bank_account)
    .bind(data.payroll)
    .bind(data.is_teacher)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    let rows = sqlx::query(
        "UPDATE employee SET name = COALESCE(?1, name), surname = COALESCE(?2, surname), address = COALESCE(?3, address), phone = COALESCE(?4, phone), birthdate = COALESCE(?5, birthdate), email = COALESCE(?6, email), bank_account = COALESCE(?7, bank_account), payroll = COALESCE(?8, payroll), is_teacher = COALESCE(?9, is_teacher) WHERE id = ?10",
    )
    .bind(data.name)
    .bind(data.surname)
    .bind(data.address)
    .bind(data.phone)
    .bind(data.birthdate)
    .bind(data.email)
    .bind(data.bank_account)
    .bind(data.payroll)
    .bind(data.is_teacher)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

/// Delete an employee; reservations they taught keep no teacher
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
