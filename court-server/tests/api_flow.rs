//! End-to-end HTTP flow against an in-memory database

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::NaiveDate;
use court_server::{Config, ServerState, build_app};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::in_memory(config).await.unwrap();
    build_app(&state).with_state(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, created) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri}: {created}");
    created["id"].as_i64().unwrap()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 10).unwrap()
}

fn at(hour: u32, minute: u32) -> i64 {
    day()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

fn employee(name: &str, is_teacher: bool) -> Value {
    json!({
        "name": name,
        "surname": "Nowak",
        "address": "ul. Polna 1",
        "phone": "600100200",
        "birthdate": "1990-05-01",
        "email": "coach@club.pl",
        "bank_account": "PL61109010140000071219812874",
        "payroll": 4200.0,
        "is_teacher": is_teacher
    })
}

fn client_json() -> Value {
    json!({
        "name": "Anna",
        "surname": "Kowalska",
        "address": "ul. Lipowa 3",
        "phone": "500600700",
        "birthdate": "1985-01-01",
        "email": "anna@club.pl"
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_court_returns_created_message() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/courts",
        Some(json!({ "name": "Centre" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(
        created["message"],
        format!("successfully created new resource '{id}'.")
    );

    let (status, list) = send(&app, Method::GET, "/api/courts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["items"][0]["name"], "Centre");

    // 重名
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/courts",
        Some(json!({ "name": "Centre" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_court_is_not_found() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/courts/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn test_reservation_window_rules() {
    let app = test_app().await;
    let court = create(&app, "/api/courts", json!({ "name": "Court 1" })).await;

    create(
        &app,
        "/api/court-reservations",
        json!({ "court_id": court, "start": at(10, 0), "end": at(11, 30) }),
    )
    .await;

    // 重叠
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/court-reservations",
        Some(json!({ "court_id": court, "start": at(11, 0), "end": at(12, 0) })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 2002);

    // 首尾相接不算重叠
    create(
        &app,
        "/api/court-reservations",
        json!({ "court_id": court, "start": at(11, 30), "end": at(12, 0) }),
    )
    .await;

    // 营业时间外
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/court-reservations",
        Some(json!({ "court_id": court, "start": at(6, 0), "end": at(7, 0) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2003);

    // 未对齐
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/court-reservations",
        Some(json!({ "court_id": court, "start": at(13, 15), "end": at(14, 0) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2004);

    let (_, list) = send(
        &app,
        Method::GET,
        "/api/court-reservations?date=2030-06-10",
        None,
    )
    .await;
    assert_eq!(list["total"], 2);

    // 有预约的场地不能删除
    let (status, _) = send(&app, Method::DELETE, &format!("/api/courts/{court}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_teachers_only_filter() {
    let app = test_app().await;
    create(&app, "/api/employees", employee("Marek", true)).await;
    create(&app, "/api/employees", employee("Ewa", false)).await;

    let (_, all) = send(&app, Method::GET, "/api/employees", None).await;
    assert_eq!(all["total"], 2);

    let (_, teachers) = send(&app, Method::GET, "/api/employees?teachers_only=true", None).await;
    assert_eq!(teachers["total"], 1);
    assert_eq!(teachers["items"][0]["name"], "Marek");
}

#[tokio::test]
async fn test_checkout_quote_and_cascade_delete() {
    let app = test_app().await;

    let court = create(&app, "/api/courts", json!({ "name": "Court 1" })).await;
    let teacher = create(&app, "/api/employees", employee("Marek", true)).await;
    let student = create(&app, "/api/employees", employee("Ewa", false)).await;
    let client = create(&app, "/api/clients", client_json()).await;
    let racket = create(&app, "/api/items", json!({ "name": "Racket" })).await;
    let service = create(
        &app,
        "/api/prices",
        json!({ "name": "Hour", "cost": 60.0, "is_item": false }),
    )
    .await;
    let rental = create(
        &app,
        "/api/prices",
        json!({ "name": "Rental", "cost": 10.0, "is_item": true }),
    )
    .await;
    let discount = create(
        &app,
        "/api/discounts",
        json!({ "name": "Club", "is_percentage": true, "value": 10.0 }),
    )
    .await;

    let reservation = create(
        &app,
        "/api/court-reservations",
        json!({ "court_id": court, "start": at(18, 0), "end": at(19, 0) }),
    )
    .await;

    let lines = json!([
        { "item_id": racket, "price_id": rental, "count": 2 },
        { "item_id": racket, "price_id": null, "count": 1 }
    ]);

    // 报价: (60 + 2 × 10) × 0.9
    let (status, quote) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({
            "price_id": service,
            "discount_id": discount,
            "item_reservations": lines
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["total"].as_f64(), Some(72.0));
    assert_eq!(quote["formatted_total"], "72.00zł");

    // 非教练不能带课
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/court-reservations/{reservation}/checkout"),
        Some(json!({
            "client_id": client,
            "teacher_id": student,
            "price_id": service,
            "item_reservations": lines
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    // 商品价格不能用作场地价格
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/court-reservations/{reservation}/checkout"),
        Some(json!({ "client_id": client, "price_id": rental })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3003);

    let (status, checkout) = send(
        &app,
        Method::POST,
        &format!("/api/court-reservations/{reservation}/checkout"),
        Some(json!({
            "client_id": client,
            "teacher_id": teacher,
            "price_id": service,
            "discount_id": discount,
            "item_reservations": lines
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{checkout}");
    assert_eq!(checkout["total"].as_f64(), Some(72.0));
    assert_eq!(checkout["reservation"]["teacher_id"], teacher);
    assert_eq!(checkout["item_reservations"].as_array().unwrap().len(), 1);
    assert_eq!(checkout["item_reservations"][0]["start"], at(18, 0));
    // 一笔场地交易 + 每个商品预约一笔
    assert_eq!(checkout["transactions"].as_array().unwrap().len(), 2);

    // 只能结算一次
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/court-reservations/{reservation}/checkout"),
        Some(json!({ "client_id": client, "price_id": service })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 2006);

    let (_, transactions) = send(
        &app,
        Method::GET,
        &format!("/api/transactions?reservation_id={reservation}"),
        None,
    )
    .await;
    assert_eq!(transactions["total"], 1);

    // 级联删除
    let (status, deleted) = send(
        &app,
        Method::DELETE,
        &format!("/api/court-reservations/{reservation}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!(true));

    let (_, items) = send(
        &app,
        Method::GET,
        &format!("/api/item-reservations?court_reservation_id={reservation}"),
        None,
    )
    .await;
    assert_eq!(items["total"], 0);

    let (_, transactions) = send(&app, Method::GET, "/api/transactions", None).await;
    assert_eq!(transactions["total"], 0);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/court-reservations/{reservation}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_scheduler_marks_reserved_slots() {
    let app = test_app().await;
    create(&app, "/api/courts", json!({ "name": "A" })).await;
    let court_b = create(&app, "/api/courts", json!({ "name": "B" })).await;

    create(
        &app,
        "/api/court-reservations",
        json!({ "court_id": court_b, "start": at(10, 0), "end": at(11, 30) }),
    )
    .await;

    let (status, grid) = send(&app, Method::GET, "/api/scheduler?date=2030-06-10", None).await;
    assert_eq!(status, StatusCode::OK);

    let rows = grid["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 30);
    assert_eq!(rows[0]["time"], at(7, 0));
    assert_eq!(grid["courts"][1]["name"], "B");

    // 10:00 = 第 6 格, 11:00 = 第 8 格
    for (index, row) in rows.iter().enumerate() {
        let expected = (6..=8).contains(&index);
        assert_eq!(row["selected"][1], expected, "row {index}");
        assert_eq!(row["selected"][0], false, "row {index}");
    }

    assert_eq!(grid["reservations"][0]["start_row"], 6);
    assert_eq!(grid["reservations"][0]["end_row"], 8);
    assert_eq!(grid["reservations"][0]["span"], 3);

    // 其他日期为空
    let (_, other) = send(&app, Method::GET, "/api/scheduler?date=2030-06-11", None).await;
    assert!(other["reservations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_amounts_and_counts_are_bounded() {
    let app = test_app().await;

    // 超出上限的金额不能入库
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/prices",
        Some(json!({ "name": "Gold", "cost": 1e30, "is_item": false })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8);

    let racket = create(&app, "/api/items", json!({ "name": "Racket" })).await;
    let service = create(
        &app,
        "/api/prices",
        json!({ "name": "Hour", "cost": 60.0, "is_item": false }),
    )
    .await;
    let rental = create(
        &app,
        "/api/prices",
        json!({ "name": "Rental", "cost": 1e10, "is_item": true }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({
            "price_id": service,
            "item_reservations": [
                { "item_id": racket, "price_id": rental, "count": i64::MAX }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8);
}

#[tokio::test]
async fn test_update_null_clears_teacher() {
    let app = test_app().await;
    let court = create(&app, "/api/courts", json!({ "name": "Court 1" })).await;
    let teacher = create(&app, "/api/employees", employee("Marek", true)).await;
    let reservation = create(
        &app,
        "/api/court-reservations",
        json!({
            "court_id": court,
            "teacher_id": teacher,
            "start": at(9, 0),
            "end": at(10, 0),
            "note": "lesson"
        }),
    )
    .await;
    let uri = format!("/api/court-reservations/{reservation}");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "end": at(10, 30) }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["teacher_id"], teacher);
    assert_eq!(body["note"], "lesson");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "teacher_id": null, "note": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["teacher_id"].is_null());
    assert!(body["note"].is_null());
    assert_eq!(body["end"], at(10, 30));
}
