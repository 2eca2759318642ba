//! Client Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Client, ClientCreate, ClientUpdate};
use sqlx::SqlitePool;

const CLIENT_SELECT: &str = "SELECT id, name, surname, address, phone, birthdate, email, is_permanent, created_at FROM client";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Client>> {
    let sql = format!("{CLIENT_SELECT} ORDER BY created_at DESC, id DESC");
    let clients = sqlx::query_as::<_, Client>(&sql).fetch_all(pool).await?;
    Ok(clients)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Client>> {
    let sql = format!("{CLIENT_SELECT} WHERE id = ?");
    let client = sqlx::query_as::<_, Client>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(client)
}

pub async fn create(pool: &SqlitePool, data: ClientCreate) -> RepoResult<Client> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO client (id, name, surname, address, phone, birthdate, email, is_permanent, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.surname)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.birthdate)
    .bind(&data.email)
    .bind(data.is_permanent)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create client".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ClientUpdate) -> RepoResult<Client> {
    let rows = sqlx::query(
        "UPDATE client SET name = COALESCE(?1, name), surname = COALESCE(?2, surname), address = COALESCE(?3, address), phone = COALESCE(?4, phone), birthdate = COALESCE(?5, birthdate), email = COALESCE(?6, email), is_permanent = COALESCE(?7, is_permanent) WHERE id = ?8",
    )
    .bind(data.name)
    .bind(data.surname)
    .bind(data.address)
    .bind(data.phone)
    .bind(data.birthdate)
    .bind(data.email)
    .bind(data.is_permanent)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Client {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Client {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reservation_transaction WHERE client_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if count > 0 {
        return Err(RepoError::Rule(
            ErrorCode::ClientInUse,
            format!("Client {id} has {count} transactions"),
        ));
    }
    let rows = sqlx::query("DELETE FROM client WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
