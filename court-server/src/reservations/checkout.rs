//! Checkout and quote
//!
//! Checkout charges a court reservation: the teacher is set, complete item
//! lines become item reservations over the same window, and one transaction
//! is written for the court reservation plus one per item reservation.
//! Everything is validated first and written in a single SQL transaction.

use std::collections::HashMap;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    CheckoutRequest, CheckoutResponse, Discount, ItemLine, ItemReservationCreate, Price,
    QuoteRequest, QuoteResponse, TransactionCreate,
};
use shared::pricing::{
    DiscountTerms, MAX_ITEM_COUNT, PriceLookup, compute_total, format_price, item_price_lookup,
    line_cost,
};
use sqlx::SqlitePool;

use super::rules::ensure_teacher;
use crate::db::repository::{
    RepoError, client, court_reservation, discount, item, item_reservation, price, transaction,
};
use crate::utils::validation::validate_item_count;

/// Service (non-item) price by id
async fn service_price(pool: &SqlitePool, price_id: i64) -> AppResult<Price> {
    let p = price::find_by_id(pool, price_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PriceNotFound).with_detail("id", price_id))?;
    if p.is_item {
        return Err(AppError::with_message(
            ErrorCode::PriceKindMismatch,
            format!("Price '{}' is an item price", p.name),
        )
        .with_detail("id", price_id));
    }
    Ok(p)
}

async fn find_discount(pool: &SqlitePool, discount_id: Option<i64>) -> AppResult<Option<Discount>> {
    let Some(id) = discount_id else {
        return Ok(None);
    };
    let d = discount::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DiscountNotFound).with_detail("id", id))?;
    Ok(Some(d))
}

async fn item_prices(pool: &SqlitePool) -> AppResult<PriceLookup> {
    let prices = price::find_all(pool, Some(true)).await?;
    Ok(item_price_lookup(&prices))
}

/// Counts above the per-line maximum are rejected; empty or non-positive
/// counts only mark a line as incomplete.
fn check_counts(lines: &[ItemLine]) -> AppResult<()> {
    lines
        .iter()
        .filter_map(|line| line.count)
        .filter(|count| *count > MAX_ITEM_COUNT)
        .try_for_each(|count| validate_item_count(count, "count"))
}

/// Live total of a draft checkout
///
/// Without a service price there is no total yet; the per-line costs are
/// still reported.
pub async fn quote(pool: &SqlitePool, req: QuoteRequest) -> AppResult<QuoteResponse> {
    check_counts(&req.item_reservations)?;
    let lookup = item_prices(pool).await?;
    let lines = req
        .item_reservations
        .iter()
        .map(|line| line_cost(line, &lookup))
        .collect();

    let Some(price_id) = req.price_id else {
        return Ok(QuoteResponse {
            total: None,
            formatted_total: None,
            lines,
        });
    };

    let service = service_price(pool, price_id).await?;
    let terms = find_discount(pool, req.discount_id)
        .await?
        .as_ref()
        .map(DiscountTerms::from);
    let total = compute_total(service.cost, &req.item_reservations, &lookup, terms);

    Ok(QuoteResponse {
        total: Some(total),
        formatted_total: Some(format_price(total)),
        lines,
    })
}

/// Complete lines of the form, every item and item price checked
async fn checked_lines(
    pool: &SqlitePool,
    lines: &[ItemLine],
    lookup: &PriceLookup,
) -> AppResult<Vec<(i64, i64, i64)>> {
    let mut complete = Vec::new();
    let mut known_items: HashMap<i64, bool> = HashMap::new();

    for line in lines {
        let Some((item_id, price_id, count)) = line.complete() else {
            continue;
        };

        if !known_items.contains_key(&item_id) {
            let exists = item::find_by_id(pool, item_id).await?.is_some();
            known_items.insert(item_id, exists);
        }
        if known_items.get(&item_id) != Some(&true) {
            return Err(AppError::new(ErrorCode::ItemNotFound).with_detail("id", item_id));
        }

        if !lookup.contains_key(&price_id) {
            // Either unknown or a service price
            return match price::find_by_id(pool, price_id).await? {
                Some(p) => Err(AppError::with_message(
                    ErrorCode::PriceKindMismatch,
                    format!("Price '{}' is not an item price", p.name),
                )
                .with_detail("id", price_id)),
                None => Err(AppError::new(ErrorCode::PriceNotFound).with_detail("id", price_id)),
            };
        }

        complete.push((item_id, price_id, count));
    }
    Ok(complete)
}

/// Charge a court reservation
pub async fn checkout(
    pool: &SqlitePool,
    reservation_id: i64,
    req: CheckoutRequest,
) -> AppResult<CheckoutResponse> {
    let reservation = court_reservation::find_by_id(pool, reservation_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::ReservationNotFound).with_detail("id", reservation_id)
        })?;

    if transaction::exists_for_reservation(pool, reservation_id).await? {
        return Err(AppError::new(ErrorCode::ReservationAlreadyCheckedOut)
            .with_detail("id", reservation_id));
    }
    if client::find_by_id(pool, req.client_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::ClientNotFound).with_detail("id", req.client_id));
    }
    ensure_teacher(pool, req.teacher_id).await?;
    check_counts(&req.item_reservations)?;

    let service = service_price(pool, req.price_id).await?;
    let discount = find_discount(pool, req.discount_id).await?;
    let lookup = item_prices(pool).await?;
    let lines = checked_lines(pool, &req.item_reservations, &lookup).await?;

    let total = compute_total(
        service.cost,
        &req.item_reservations,
        &lookup,
        discount.as_ref().map(DiscountTerms::from),
    );

    // ========== Write ==========
    // 第一条语句就是条件写入: 并发结算时只有一个能成功
    let mut tx = pool.begin().await.map_err(RepoError::from)?;

    let court_charge = transaction::insert_first(
        &mut tx,
        &TransactionCreate {
            client_id: req.client_id,
            reservation_id,
            price_id: service.id,
            discount_id: req.discount_id,
        },
    )
    .await?
    .ok_or_else(|| {
        AppError::new(ErrorCode::ReservationAlreadyCheckedOut).with_detail("id", reservation_id)
    })?;

    court_reservation::set_teacher(&mut tx, reservation_id, req.teacher_id).await?;

    let mut item_reservations = Vec::with_capacity(lines.len());
    for (item_id, price_id, count) in lines {
        let created = item_reservation::insert(
            &mut tx,
            &ItemReservationCreate {
                item_id,
                price_id,
                count,
                start: reservation.start,
                end: reservation.end,
                court_reservation_id: reservation_id,
            },
        )
        .await?;
        item_reservations.push(created);
    }

    let mut transactions = Vec::with_capacity(item_reservations.len() + 1);
    transactions.push(court_charge);
    for ir in &item_reservations {
        transactions.push(
            transaction::insert(
                &mut tx,
                &TransactionCreate {
                    client_id: req.client_id,
                    reservation_id: ir.id,
                    price_id: ir.price_id,
                    discount_id: req.discount_id,
                },
            )
            .await?,
        );
    }

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        reservation_id,
        client_id = req.client_id,
        items = item_reservations.len(),
        total,
        "Court reservation checked out"
    );

    let reservation = court_reservation::find_by_id(pool, reservation_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::ReservationNotFound).with_detail("id", reservation_id)
        })?;

    Ok(CheckoutResponse {
        reservation,
        item_reservations,
        transactions,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::court;
    use shared::models::{ClientCreate, CourtCreate, CourtReservationCreate, PriceCreate};

    const HOUR: i64 = 60 * 60 * 1000;
    const BASE: i64 = 1_900_000_000_000;

    struct Fixture {
        reservation_id: i64,
        request: CheckoutRequest,
    }

    async fn fixture(pool: &SqlitePool) -> Fixture {
        let court_id = court::create(pool, CourtCreate { name: "Centre".into() })
            .await
            .unwrap()
            .id;
        let reservation_id = court_reservation::create(
            pool,
            CourtReservationCreate {
                court_id,
                teacher_id: None,
                start: BASE,
                end: BASE + HOUR,
                note: None,
            },
        )
        .await
        .unwrap()
        .id;
        let client_id = client::create(
            pool,
            ClientCreate {
                name: "Anna".into(),
                surname: "Kowalska".into(),
                address: "ul. Lipowa 3".into(),
                phone: "500600700".into(),
                birthdate: "1985-01-01".into(),
                email: None,
                is_permanent: false,
            },
        )
        .await
        .unwrap()
        .id;
        let price_id = price::create(
            pool,
            PriceCreate {
                name: "Court hour".into(),
                cost: 80.0,
                is_item: false,
            },
        )
        .await
        .unwrap()
        .id;

        Fixture {
            reservation_id,
            request: CheckoutRequest {
                client_id,
                teacher_id: None,
                price_id,
                discount_id: None,
                item_reservations: vec![],
            },
        }
    }

    #[tokio::test]
    async fn test_second_checkout_rejected() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let f = fixture(&pool).await;

        let first = checkout(&pool, f.reservation_id, f.request.clone()).await.unwrap();
        assert_eq!(first.total, 80.0);
        assert_eq!(first.transactions.len(), 1);

        let err = checkout(&pool, f.reservation_id, f.request).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationAlreadyCheckedOut);
    }

    #[tokio::test]
    async fn test_concurrent_checkouts_charge_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("court.db");
        let pool = DbService::new(path.to_str().unwrap()).await.unwrap().pool;
        let f = fixture(&pool).await;

        let (a, b) = tokio::join!(
            checkout(&pool, f.reservation_id, f.request.clone()),
            checkout(&pool, f.reservation_id, f.request.clone()),
        );

        let outcomes = [a, b];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        let err = outcomes.into_iter().find_map(Result::err).unwrap();
        assert_eq!(err.code, ErrorCode::ReservationAlreadyCheckedOut);

        let charged = transaction::find_all(&pool, Some(f.reservation_id)).await.unwrap();
        assert_eq!(charged.len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_count_rejected() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let f = fixture(&pool).await;
        let item_id = item::create(&pool, shared::models::ItemCreate { name: "Racket".into() })
            .await
            .unwrap()
            .id;

        let mut request = f.request;
        request.item_reservations = vec![ItemLine {
            item_id: Some(item_id),
            price_id: Some(request.price_id),
            count: Some(i64::MAX),
        }];

        let err = checkout(&pool, f.reservation_id, request.clone()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        let err = quote(
            &pool,
            QuoteRequest {
                price_id: Some(request.price_id),
                discount_id: None,
                item_reservations: request.item_reservations,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        assert!(!transaction::exists_for_reservation(&pool, f.reservation_id).await.unwrap());
    }
}
