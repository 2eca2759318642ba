//! Court Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Court, CourtCreate, CourtUpdate};
use sqlx::SqlitePool;

const COURT_SELECT: &str = "SELECT id, name, created_at FROM court";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Court>> {
    let sql = format!("{COURT_SELECT} ORDER BY created_at DESC, id DESC");
    let courts = sqlx::query_as::<_, Court>(&sql).fetch_all(pool).await?;
    Ok(courts)
}

/// Courts in grid column order (by name)
pub async fn find_all_for_grid(pool: &SqlitePool) -> RepoResult<Vec<Court>> {
    let sql = format!("{COURT_SELECT} ORDER BY name, id");
    let courts = sqlx::query_as::<_, Court>(&sql).fetch_all(pool).await?;
    Ok(courts)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Court>> {
    let sql = format!("{COURT_SELECT} WHERE id = ?");
    let court = sqlx::query_as::<_, Court>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(court)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Court>> {
    let sql = format!("{COURT_SELECT} WHERE name = ? LIMIT 1");
    let court = sqlx::query_as::<_, Court>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(court)
}

pub async fn create(pool: &SqlitePool, data: CourtCreate) -> RepoResult<Court> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Court '{}' already exists",
            data.name
        )));
    }
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO court (id, name, created_at) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(&data.name)
        .bind(now)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create court".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CourtUpdate) -> RepoResult<Court> {
    if let Some(name) = &data.name
        && let Some(existing) = find_by_name(pool, name).await?
        && existing.id != id
    {
        return Err(RepoError::Duplicate(format!("Court '{name}' already exists")));
    }
    let rows = sqlx::query("UPDATE court SET name = COALESCE(?1, name) WHERE id = ?2")
        .bind(data.name)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Court {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Court {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM court_reservation WHERE court_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if count > 0 {
        return Err(RepoError::Rule(
            ErrorCode::CourtHasReservations,
            format!("Cannot delete court with {count} reservations"),
        ));
    }
    let rows = sqlx::query("DELETE FROM court WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
