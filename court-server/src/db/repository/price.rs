//! Price Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Price, PriceCreate, PriceUpdate};
use sqlx::SqlitePool;

const PRICE_SELECT: &str = "SELECT id, name, cost, is_item, created_at FROM price";

/// All prices, optionally only item (`Some(true)`) or service (`Some(false)`) prices
pub async fn find_all(pool: &SqlitePool, is_item: Option<bool>) -> RepoResult<Vec<Price>> {
    let prices = match is_item {
        Some(flag) => {
            let sql = format!("{PRICE_SELECT} WHERE is_item = ? ORDER BY created_at DESC, id DESC");
            sqlx::query_as::<_, Price>(&sql)
                .bind(flag)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{PRICE_SELECT} ORDER BY created_at DESC, id DESC");
            sqlx::query_as::<_, Price>(&sql).fetch_all(pool).await?
        }
    };
    Ok(prices)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Price>> {
    let sql = format!("{PRICE_SELECT} WHERE id = ?");
    let price = sqlx::query_as::<_, Price>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(price)
}

pub async fn create(pool: &SqlitePool, data: PriceCreate) -> RepoResult<Price> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO price (id, name, cost, is_item, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.cost)
    .bind(data.is_item)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create price".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PriceUpdate) -> RepoResult<Price> {
    let rows = sqlx::query(
        "UPDATE price SET name = COALESCE(?1, name), cost = COALESCE(?2, cost), is_item = COALESCE(?3, is_item) WHERE id = ?4",
    )
    .bind(data.name)
    .bind(data.cost)
    .bind(data.is_item)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Price {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Price {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM reservation_transaction WHERE price_id = ?1) + (SELECT COUNT(*) FROM item_reservation WHERE price_id = ?1)",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if count > 0 {
        return Err(RepoError::Rule(
            ErrorCode::PriceInUse,
            format!("Price {id} is used by {count} records"),
        ));
    }
    let rows = sqlx::query("DELETE FROM price WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
