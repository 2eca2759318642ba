//! Transaction Repository
//!
//! Table is `reservation_transaction` (TRANSACTION is an SQL keyword).

use super::{RepoError, RepoResult, Tx};
use shared::models::{Transaction, TransactionCreate, TransactionUpdate};
use sqlx::SqlitePool;

const TRANSACTION_SELECT: &str = "SELECT id, client_id, reservation_id, price_id, discount_id, created_at FROM reservation_transaction";

/// All transactions, optionally only those of one reservation
pub async fn find_all(
    pool: &SqlitePool,
    reservation_id: Option<i64>,
) -> RepoResult<Vec<Transaction>> {
    let transactions = match reservation_id {
        Some(rid) => {
            let sql = format!(
                "{TRANSACTION_SELECT} WHERE reservation_id = ? ORDER BY created_at DESC, id DESC"
            );
            sqlx::query_as::<_, Transaction>(&sql)
                .bind(rid)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{TRANSACTION_SELECT} ORDER BY created_at DESC, id DESC");
            sqlx::query_as::<_, Transaction>(&sql)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(transactions)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Transaction>> {
    let sql = format!("{TRANSACTION_SELECT} WHERE id = ?");
    let transaction = sqlx::query_as::<_, Transaction>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(transaction)
}

/// Whether a reservation has already been charged
pub async fn exists_for_reservation(pool: &SqlitePool, reservation_id: i64) -> RepoResult<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reservation_transaction WHERE reservation_id = ?")
            .bind(reservation_id)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// Whether `reservation_id` names a court or item reservation
pub async fn reservation_exists(pool: &SqlitePool, reservation_id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM court_reservation WHERE id = ?1) + (SELECT COUNT(*) FROM item_reservation WHERE id = ?1)",
    )
    .bind(reservation_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, data: TransactionCreate) -> RepoResult<Transaction> {
    let mut tx = pool.begin().await?;
    let transaction = insert(&mut tx, &data).await?;
    tx.commit().await?;
    Ok(transaction)
}

/// Insert inside an open transaction
pub async fn insert(tx: &mut Tx<'_>, data: &TransactionCreate) -> RepoResult<Transaction> {
    let row = new_row(data);
    sqlx::query(
        "INSERT INTO reservation_transaction (id, client_id, reservation_id, price_id, discount_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(row.id)
    .bind(row.client_id)
    .bind(row.reservation_id)
    .bind(row.price_id)
    .bind(row.discount_id)
    .bind(row.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(row)
}

/// Insert the first charge of a reservation; `None` if it is already charged
///
/// The existence check and the write are one statement, so of two
/// concurrent charges only one can land.
pub async fn insert_first(
    tx: &mut Tx<'_>,
    data: &TransactionCreate,
) -> RepoResult<Option<Transaction>> {
    let row = new_row(data);
    let rows = sqlx::query(
        "INSERT INTO reservation_transaction (id, client_id, reservation_id, price_id, discount_id, created_at) \
         SELECT ?1, ?2, ?3, ?4, ?5, ?6 \
         WHERE NOT EXISTS (SELECT 1 FROM reservation_transaction WHERE reservation_id = ?3)",
    )
    .bind(row.id)
    .bind(row.client_id)
    .bind(row.reservation_id)
    .bind(row.price_id)
    .bind(row.discount_id)
    .bind(row.created_at)
    .execute(&mut **tx)
    .await?;
    Ok((rows.rows_affected() > 0).then_some(row))
}

fn new_row(data: &TransactionCreate) -> Transaction {
    Transaction {
        id: shared::util::snowflake_id(),
        client_id: data.client_id,
        reservation_id: data.reservation_id,
        price_id: data.price_id,
        discount_id: data.discount_id,
        created_at: shared::util::now_millis(),
    }
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: TransactionUpdate,
) -> RepoResult<Transaction> {
    let rows = sqlx::query(
        "UPDATE reservation_transaction SET client_id = COALESCE(?1, client_id), price_id = COALESCE(?2, price_id), discount_id = COALESCE(?3, discount_id) WHERE id = ?4",
    )
    .bind(data.client_id)
    .bind(data.price_id)
    .bind(data.discount_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Transaction {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Transaction {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM reservation_transaction WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Delete every transaction of a reservation inside an open transaction
pub async fn delete_for_reservation(tx: &mut Tx<'_>, reservation_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM reservation_transaction WHERE reservation_id = ?")
        .bind(reservation_id)
        .execute(&mut **tx)
        .await?;
    Ok(rows.rows_affected())
}
