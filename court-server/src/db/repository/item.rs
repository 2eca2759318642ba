//! Item Repository

use super::{RepoError, RepoResult};
use shared::models::{Item, ItemCreate, ItemUpdate};
use sqlx::SqlitePool;

const ITEM_SELECT: &str = "SELECT id, name, created_at FROM item";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Item>> {
    let sql = format!("{ITEM_SELECT} ORDER BY created_at DESC, id DESC");
    let items = sqlx::query_as::<_, Item>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Item>> {
    let sql = format!("{ITEM_SELECT} WHERE id = ?");
    let item = sqlx::query_as::<_, Item>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: ItemCreate) -> RepoResult<Item> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO item (id, name, created_at) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(&data.name)
        .bind(now)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ItemUpdate) -> RepoResult<Item> {
    let rows = sqlx::query("UPDATE item SET name = COALESCE(?1, name) WHERE id = ?2")
        .bind(data.name)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM item_reservation WHERE item_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Err(RepoError::Validation(
            "Cannot delete item with reservations".into(),
        ));
    }
    let rows = sqlx::query("DELETE FROM item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
