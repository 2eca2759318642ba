//! Item Reservation Repository

use super::{RepoError, RepoResult, Tx};
use shared::models::{ItemReservation, ItemReservationCreate, ItemReservationUpdate};
use sqlx::SqlitePool;

const ITEM_RESERVATION_SELECT: &str = "SELECT id, item_id, price_id, count, start_at, end_at, court_reservation_id, created_at FROM item_reservation";

/// All item reservations, optionally only those attached to one court reservation
pub async fn find_all(
    pool: &SqlitePool,
    court_reservation_id: Option<i64>,
) -> RepoResult<Vec<ItemReservation>> {
    let reservations = match court_reservation_id {
        Some(crid) => {
            let sql = format!(
                "{ITEM_RESERVATION_SELECT} WHERE court_reservation_id = ? ORDER BY created_at DESC, id DESC"
            );
            sqlx::query_as::<_, ItemReservation>(&sql)
                .bind(crid)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{ITEM_RESERVATION_SELECT} ORDER BY created_at DESC, id DESC");
            sqlx::query_as::<_, ItemReservation>(&sql)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(reservations)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ItemReservation>> {
    let sql = format!("{ITEM_RESERVATION_SELECT} WHERE id = ?");
    let reservation = sqlx::query_as::<_, ItemReservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(reservation)
}

pub async fn create(pool: &SqlitePool, data: ItemReservationCreate) -> RepoResult<ItemReservation> {
    let mut tx = pool.begin().await?;
    let reservation = insert(&mut tx, &data).await?;
    tx.commit().await?;
    Ok(reservation)
}

/// Insert inside an open transaction
pub async fn insert(
    tx: &mut Tx<'_>,
    data: &ItemReservationCreate,
) -> RepoResult<ItemReservation> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO item_reservation (id, item_id, price_id, count, start_at, end_at, court_reservation_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(data.item_id)
    .bind(data.price_id)
    .bind(data.count)
    .bind(data.start)
    .bind(data.end)
    .bind(data.court_reservation_id)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(ItemReservation {
        id,
        item_id: data.item_id,
        price_id: data.price_id,
        count: data.count,
        start: data.start,
        end: data.end,
        court_reservation_id: data.court_reservation_id,
        created_at: now,
    })
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: ItemReservationUpdate,
) -> RepoResult<ItemReservation> {
    let rows = sqlx::query(
        "UPDATE item_reservation SET item_id = COALESCE(?1, item_id), price_id = COALESCE(?2, price_id), count = COALESCE(?3, count) WHERE id = ?4",
    )
    .bind(data.item_id)
    .bind(data.price_id)
    .bind(data.count)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Item reservation {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Item reservation {id} not found")))
}

/// Delete an item reservation and its transactions
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    super::transaction::delete_for_reservation(&mut tx, id).await?;
    let rows = sqlx::query("DELETE FROM item_reservation WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}
