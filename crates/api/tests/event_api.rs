//! HTTP-level integration tests for events, registration, attendance,
//! and the gallery.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, delete_auth, get, get_auth, post_json_auth, seed_and_login, seed_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create an event through the API, `days_from_now` days in the future
/// (negative for past events). Returns its id.
async fn create_event(
    pool: &PgPool,
    admin_token: &str,
    title: &str,
    days_from_now: i64,
    capacity: Option<i32>,
) -> i64 {
    let date = (Utc::now() + Duration::days(days_from_now)).date_naive();
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "title": title,
        "description": "Open studio evening",
        "location": "Main hall",
        "date": date,
        "capacity": capacity,
    });
    let response = post_json_auth(app, "/api/v1/events", body, admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("event id")
}

async fn register_for(pool: &PgPool, token: &str, event_id: i64) -> axum::response::Response {
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/register"),
        serde_json::json!({}),
        token,
    )
    .await
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Only admins may create events; capacity must be positive when set.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_event_rules(pool: PgPool) {
    let member_token = seed_and_login(&pool, "mem", "member").await;
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    let date = (Utc::now() + Duration::days(5)).date_naive();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Vernissage", "date": date });
    let response = post_json_auth(app, "/api/v1/events", body, &member_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Vernissage", "date": date, "capacity": 0 });
    let response = post_json_auth(app, "/api/v1/events", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    create_event(&pool, &admin_token, "Vernissage", 5, Some(40)).await;
}

/// Upcoming/past listings split on the event date; today still counts
/// as upcoming.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upcoming_past_split(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    create_event(&pool, &admin_token, "Future", 10, None).await;
    create_event(&pool, &admin_token, "Tonight", 0, None).await;
    create_event(&pool, &admin_token, "Bygone", -10, None).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/events/upcoming").await;
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let titles: Vec<_> = rows.iter().map(|r| r["title"].as_str().unwrap()).collect();
    assert!(titles.contains(&"Future"));
    assert!(titles.contains(&"Tonight"));

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/events/past").await;
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Bygone");
}

/// Updating an event notifies everyone on the roster.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_notifies_roster(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    let goer_token = seed_and_login(&pool, "goer", "member").await;
    let event_id = create_event(&pool, &admin_token, "Workshop", 7, None).await;

    let response = register_for(&pool, &goer_token, event_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "location": "Annex" });
    let response = common::put_json_auth(
        app,
        &format!("/api/v1/events/{event_id}"),
        body,
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let notified: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE notification_type = 'event_update'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(notified, 1);
}

// ---------------------------------------------------------------------------
// Registration preconditions
// ---------------------------------------------------------------------------

/// A successful registration writes the row and a notification.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    let goer_token = seed_and_login(&pool, "goer", "member").await;
    let event_id = create_event(&pool, &admin_token, "Crit Night", 7, Some(20)).await;

    let response = register_for(&pool, &goer_token, event_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["event_id"], event_id);
    assert_eq!(json["data"]["attended"], false);

    let notified: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE notification_type = 'event_registration'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(notified, 1);
}

/// Registering twice is rejected with 400 and leaves a single row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_rejected(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    let goer_token = seed_and_login(&pool, "goer", "member").await;
    let event_id = create_event(&pool, &admin_token, "Repeat", 7, None).await;

    assert_eq!(register_for(&pool, &goer_token, event_id).await.status(), StatusCode::CREATED);
    assert_eq!(
        register_for(&pool, &goer_token, event_id).await.status(),
        StatusCode::BAD_REQUEST
    );

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_registrations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

/// Past events cannot be registered for.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_past_event(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    let goer_token = seed_and_login(&pool, "goer", "member").await;
    let event_id = create_event(&pool, &admin_token, "Over", -1, None).await;

    let response = register_for(&pool, &goer_token, event_id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A full event rejects further registrations and writes nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_capacity_reached(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    let first_token = seed_and_login(&pool, "first", "member").await;
    let second_token = seed_and_login(&pool, "second", "member").await;
    let event_id = create_event(&pool, &admin_token, "Tiny Room", 7, Some(1)).await;

    assert_eq!(register_for(&pool, &first_token, event_id).await.status(), StatusCode::CREATED);

    let response = register_for(&pool, &second_token, event_id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_registrations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

/// A passed registration deadline closes registration even for a future event.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_deadline_passed(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    let goer_token = seed_and_login(&pool, "goer", "member").await;

    let date = (Utc::now() + Duration::days(7)).date_naive();
    let deadline = Utc::now() - Duration::hours(1);
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "title": "Closed",
        "date": date,
        "registration_deadline": deadline,
    });
    let response = post_json_auth(app, "/api/v1/events", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let event_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = register_for(&pool, &goer_token, event_id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Unregistering removes exactly the caller's row; doing it again is 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unregister(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    let goer_token = seed_and_login(&pool, "goer", "member").await;
    let other_token = seed_and_login(&pool, "other", "member").await;
    let event_id = create_event(&pool, &admin_token, "Changeable", 7, None).await;

    register_for(&pool, &goer_token, event_id).await;
    register_for(&pool, &other_token, event_id).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/unregister"),
        serde_json::json!({}),
        &goer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_registrations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/unregister"),
        serde_json::json!({}),
        &goer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Roster and attendance
// ---------------------------------------------------------------------------

/// The roster is admin-only and attendance marking notifies the registrant.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_roster_and_attendance(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    let goer_token = seed_and_login(&pool, "goer", "member").await;
    let goer = atelier_db::repositories::UserRepo::find_by_email(&pool, "goer@test.com")
        .await
        .unwrap()
        .unwrap();
    let event_id = create_event(&pool, &admin_token, "Roll Call", 3, None).await;
    register_for(&pool, &goer_token, event_id).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/events/{event_id}/registrations"),
        &goer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/events/{event_id}/registrations"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let roster = json["data"].as_array().unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0]["username"], "goer");
    assert_eq!(roster[0]["attended"], false);

    // Missing user_id is a 400; an unknown registration is a 404.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/attendance"),
        serde_json::json!({}),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/attendance"),
        serde_json::json!({ "user_id": 99999 }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/attendance"),
        serde_json::json!({ "user_id": goer.id }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["attended"], true);

    let notified: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE notification_type = 'event_attendance'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(notified, 1);
}

/// Member stats include the caller's own registration counts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_event_stats_member_view(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    let goer_token = seed_and_login(&pool, "goer", "member").await;
    let event_id = create_event(&pool, &admin_token, "Counted", 4, None).await;
    register_for(&pool, &goer_token, event_id).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/events/stats", &goer_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["upcoming"], 1);
    assert_eq!(json["data"]["my_registrations"], 1);
    assert_eq!(json["data"]["my_attended"], 0);
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// Gallery images can be listed publicly, added and removed by admins.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_gallery_lifecycle(pool: PgPool) {
    let admin_token = seed_and_login(&pool, "rootadmin", "admin").await;
    seed_user(&pool, "bystander", "member", true).await;
    let event_id = create_event(&pool, &admin_token, "Documented", 6, None).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "image_path": "", "caption": "missing" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/images"),
        body,
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "image_path": "uploads/opening.jpg", "caption": "Opening" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/images"),
        body,
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let image_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/events/{event_id}/images")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/events/{event_id}/images/{image_id}"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/events/{event_id}/images")).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
