//! Court Reservation Repository
//!
//! Intervals are half-open `[start_at, end_at)`. Two reservations on the same
//! court conflict when they intersect; the check runs inside the INSERT/UPDATE
//! statement itself.

use super::{RepoError, RepoResult, Tx};
use shared::error::ErrorCode;
use shared::models::{CourtReservation, CourtReservationCreate, CourtReservationUpdate};
use sqlx::SqlitePool;

const RESERVATION_SELECT: &str = "SELECT id, court_id, teacher_id, start_at, end_at, note, created_at FROM court_reservation";

fn overlap_error(court_id: i64) -> RepoError {
    RepoError::Rule(
        ErrorCode::ReservationOverlap,
        format!("Court {court_id} is already reserved at this time"),
    )
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<CourtReservation>> {
    let sql = format!("{RESERVATION_SELECT} ORDER BY created_at DESC, id DESC");
    let reservations = sqlx::query_as::<_, CourtReservation>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(reservations)
}

/// Reservations starting in `[from, to)`, ordered by start
pub async fn find_starting_between(
    pool: &SqlitePool,
    from: i64,
    to: i64,
) -> RepoResult<Vec<CourtReservation>> {
    let sql = format!(
        "{RESERVATION_SELECT} WHERE start_at >= ? AND start_at < ? ORDER BY start_at, court_id"
    );
    let reservations = sqlx::query_as::<_, CourtReservation>(&sql)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;
    Ok(reservations)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<CourtReservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE id = ?");
    let reservation = sqlx::query_as::<_, CourtReservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(reservation)
}

/// Insert unless the court is already taken in `[start, end)`
pub async fn create(
    pool: &SqlitePool,
    data: CourtReservationCreate,
) -> RepoResult<CourtReservation> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "INSERT INTO court_reservation (id, court_id, teacher_id, start_at, end_at, note, created_at) \
         SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7 \
         WHERE NOT EXISTS (SELECT 1 FROM court_reservation WHERE court_id = ?2 AND start_at < ?5 AND ?4 < end_at)",
    )
    .bind(id)
    .bind(data.court_id)
    .bind(data.teacher_id)
    .bind(data.start)
    .bind(data.end)
    .bind(&data.note)
    .bind(now)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(overlap_error(data.court_id));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create court reservation".into()))
}

/// Update a reservation; a time or court change re-checks overlap and moves
/// the attached item reservations along.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: CourtReservationUpdate,
) -> RepoResult<CourtReservation> {
    let current = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Court reservation {id} not found")))?;

    let court_id = data.court_id.unwrap_or(current.court_id);
    let start = data.start.unwrap_or(current.start);
    let end = data.end.unwrap_or(current.end);
    if end <= start {
        return Err(RepoError::Validation(
            "Reservation end must be after its start".into(),
        ));
    }

    let mut tx = pool.begin().await?;
    let rows = sqlx::query(
        "UPDATE court_reservation SET court_id = ?1, start_at = ?3, end_at = ?4, \
         teacher_id = CASE WHEN ?7 THEN ?2 ELSE teacher_id END, \
         note = CASE WHEN ?8 THEN ?5 ELSE note END \
         WHERE id = ?6 AND NOT EXISTS (SELECT 1 FROM court_reservation WHERE court_id = ?1 AND id != ?6 AND start_at < ?4 AND ?3 < end_at)",
    )
    .bind(court_id)
    .bind(data.teacher_id.flatten())
    .bind(start)
    .bind(end)
    .bind(data.note.clone().flatten())
    .bind(id)
    // 字段缺省保留原值, null 清空
    .bind(data.teacher_id.is_some())
    .bind(data.note.is_some())
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(overlap_error(court_id));
    }
    sqlx::query("UPDATE item_reservation SET start_at = ?1, end_at = ?2 WHERE court_reservation_id = ?3")
        .bind(start)
        .bind(end)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Court reservation {id} not found")))
}

/// Set the teacher inside an open transaction
pub async fn set_teacher(tx: &mut Tx<'_>, id: i64, teacher_id: Option<i64>) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE court_reservation SET teacher_id = ?1 WHERE id = ?2")
        .bind(teacher_id)
        .bind(id)
        .execute(&mut **tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Court reservation {id} not found")));
    }
    Ok(())
}

/// Delete a reservation together with its item reservations and all their
/// transactions, atomically.
pub async fn delete_cascade(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "DELETE FROM reservation_transaction WHERE reservation_id IN (SELECT id FROM item_reservation WHERE court_reservation_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    let items = sqlx::query("DELETE FROM item_reservation WHERE court_reservation_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let charged = super::transaction::delete_for_reservation(&mut tx, id).await?;
    let rows = sqlx::query("DELETE FROM court_reservation WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(
        id,
        item_reservations = items.rows_affected(),
        transactions = charged,
        "Court reservation removed"
    );
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{court, employee, item, item_reservation, price};
    use shared::models::{
        CourtCreate, EmployeeCreate, ItemCreate, ItemReservationCreate, PriceCreate,
    };

    const HOUR: i64 = 60 * 60 * 1000;
    const BASE: i64 = 1_900_000_000_000;

    async fn test_pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    async fn new_court(pool: &SqlitePool, name: &str) -> i64 {
        court::create(pool, CourtCreate { name: name.into() })
            .await
            .unwrap()
            .id
    }

    fn booking(court_id: i64, start: i64, end: i64) -> CourtReservationCreate {
        CourtReservationCreate {
            court_id,
            teacher_id: None,
            start,
            end,
            note: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let court_id = new_court(&pool, "Centre").await;

        let created = create(&pool, booking(court_id, BASE, BASE + HOUR)).await.unwrap();
        assert_eq!(created.start, BASE);
        assert_eq!(created.end, BASE + HOUR);

        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found, created);

        let day = find_starting_between(&pool, BASE - HOUR, BASE + HOUR).await.unwrap();
        assert_eq!(day.len(), 1);
        assert!(find_starting_between(&pool, BASE + HOUR, BASE + 2 * HOUR).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overlap_rejected_per_court() {
        let pool = test_pool().await;
        let a = new_court(&pool, "A").await;
        let b = new_court(&pool, "B").await;

        create(&pool, booking(a, BASE, BASE + 2 * HOUR)).await.unwrap();

        let err = create(&pool, booking(a, BASE + HOUR, BASE + 3 * HOUR)).await.unwrap_err();
        assert!(matches!(err, RepoError::Rule(ErrorCode::ReservationOverlap, _)));

        // 其他场地 / 相邻时段
        create(&pool, booking(b, BASE + HOUR, BASE + 3 * HOUR)).await.unwrap();
        create(&pool, booking(a, BASE + 2 * HOUR, BASE + 3 * HOUR)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_moves_item_reservations() {
        let pool = test_pool().await;
        let court_id = new_court(&pool, "Centre").await;
        let r = create(&pool, booking(court_id, BASE, BASE + HOUR)).await.unwrap();

        let racket = item::create(&pool, ItemCreate { name: "Racket".into() }).await.unwrap();
        let rental = price::create(
            &pool,
            PriceCreate {
                name: "Rental".into(),
                cost: 10.0,
                is_item: true,
            },
        )
        .await
        .unwrap();
        item_reservation::create(
            &pool,
            ItemReservationCreate {
                item_id: racket.id,
                price_id: rental.id,
                count: 1,
                start: r.start,
                end: r.end,
                court_reservation_id: r.id,
            },
        )
        .await
        .unwrap();

        let updated = update(
            &pool,
            r.id,
            CourtReservationUpdate {
                start: Some(BASE + 2 * HOUR),
                end: Some(BASE + 3 * HOUR),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.start, BASE + 2 * HOUR);

        let items = item_reservation::find_all(&pool, Some(r.id)).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].start, BASE + 2 * HOUR);
        assert_eq!(items[0].end, BASE + 3 * HOUR);
    }

    #[tokio::test]
    async fn test_update_checks_overlap_and_order() {
        let pool = test_pool().await;
        let court_id = new_court(&pool, "Centre").await;
        let first = create(&pool, booking(court_id, BASE, BASE + HOUR)).await.unwrap();
        create(&pool, booking(court_id, BASE + HOUR, BASE + 2 * HOUR)).await.unwrap();

        // 只改备注不会和自己冲突
        update(
            &pool,
            first.id,
            CourtReservationUpdate {
                note: Some(Some("lesson".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = update(
            &pool,
            first.id,
            CourtReservationUpdate {
                end: Some(BASE + 2 * HOUR),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Rule(ErrorCode::ReservationOverlap, _)));

        let err = update(
            &pool,
            first.id,
            CourtReservationUpdate {
                end: Some(BASE),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_clears_teacher_and_note() {
        let pool = test_pool().await;
        let court_id = new_court(&pool, "Centre").await;
        let teacher = employee::create(
            &pool,
            EmployeeCreate {
                name: "Marek".into(),
                surname: "Nowak".into(),
                address: "ul. Polna 1".into(),
                phone: "600100200".into(),
                birthdate: "1990-05-01".into(),
                email: "coach@club.pl".into(),
                bank_account: "PL61109010140000071219812874".into(),
                payroll: 4200.0,
                is_teacher: true,
            },
        )
        .await
        .unwrap();
        let r = create(
            &pool,
            CourtReservationCreate {
                teacher_id: Some(teacher.id),
                note: Some("lesson".into()),
                ..booking(court_id, BASE, BASE + HOUR)
            },
        )
        .await
        .unwrap();

        // 缺省字段保留原值
        let kept = update(
            &pool,
            r.id,
            CourtReservationUpdate {
                end: Some(BASE + 2 * HOUR),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(kept.teacher_id, Some(teacher.id));
        assert_eq!(kept.note.as_deref(), Some("lesson"));

        let cleared = update(
            &pool,
            r.id,
            CourtReservationUpdate {
                teacher_id: Some(None),
                note: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cleared.teacher_id, None);
        assert_eq!(cleared.note, None);
        assert_eq!(cleared.end, BASE + 2 * HOUR);
    }

    #[tokio::test]
    async fn test_delete_cascade() {
        let pool = test_pool().await;
        let court_id = new_court(&pool, "Centre").await;
        let r = create(&pool, booking(court_id, BASE, BASE + HOUR)).await.unwrap();

        assert!(delete_cascade(&pool, r.id).await.unwrap());
        assert!(find_by_id(&pool, r.id).await.unwrap().is_none());
        assert!(!delete_cascade(&pool, r.id).await.unwrap());
    }
}
