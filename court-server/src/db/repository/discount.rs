//! Discount Repository

use super::{RepoError, RepoResult};
use shared::models::{Discount, DiscountCreate, DiscountUpdate};
use sqlx::SqlitePool;

const DISCOUNT_SELECT: &str = "SELECT id, name, is_percentage, value, created_at FROM discount";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Discount>> {
    let sql = format!("{DISCOUNT_SELECT} ORDER BY created_at DESC, id DESC");
    let discounts = sqlx::query_as::<_, Discount>(&sql).fetch_all(pool).await?;
    Ok(discounts)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Discount>> {
    let sql = format!("{DISCOUNT_SELECT} WHERE id = ?");
    let discount = sqlx::query_as::<_, Discount>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(discount)
}

pub async fn create(pool: &SqlitePool, data: DiscountCreate) -> RepoResult<Discount> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO discount (id, name, is_percentage, value, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.is_percentage)
    .bind(data.value)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create discount".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiscountUpdate) -> RepoResult<Discount> {
    let rows = sqlx::query(
        "UPDATE discount SET name = COALESCE(?1, name), is_percentage = COALESCE(?2, is_percentage), value = COALESCE(?3, value) WHERE id = ?4",
    )
    .bind(data.name)
    .bind(data.is_percentage)
    .bind(data.value)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Discount {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Discount {id} not found")))
}

/// Delete a discount; transactions that used it keep the charge without it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    sqlx::query("UPDATE reservation_transaction SET discount_id = NULL WHERE discount_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM discount WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}
