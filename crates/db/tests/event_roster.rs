//! Integration tests for events, registrations, and gallery images.

use atelier_db::models::event::{CreateEvent, CreateEventImage, UpdateEvent};
use atelier_db::models::user::CreateUser;
use atelier_db::repositories::{EventImageRepo, EventRegistrationRepo, EventRepo, UserRepo};
use chrono::{Duration, Utc};
use sqlx::PgPool;

fn new_user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        first_name: "Eve".to_string(),
        last_name: "Member".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    }
}

fn new_event(title: &str, days_from_now: i64) -> CreateEvent {
    CreateEvent {
        title: title.to_string(),
        description: String::new(),
        location: "Studio".to_string(),
        date: (Utc::now() + Duration::days(days_from_now)).date_naive(),
        cover_path: None,
        registration_deadline: None,
        capacity: None,
    }
}

// ---------------------------------------------------------------------------
// Test: Upcoming/past split is driven by the event date
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_upcoming_and_past_listing(pool: PgPool) {
    let creator = UserRepo::create(&pool, &new_user("eve", "eve@example.com"))
        .await
        .unwrap();

    let future = EventRepo::create(&pool, creator.id, &new_event("Opening", 14))
        .await
        .unwrap();
    let past = EventRepo::create(&pool, creator.id, &new_event("Retro", -14))
        .await
        .unwrap();
    // An event happening today counts as upcoming, not past.
    let tonight = EventRepo::create(&pool, creator.id, &new_event("Tonight", 0))
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let upcoming = EventRepo::list_upcoming(&pool, today).await.unwrap();
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0].id, tonight.id);
    assert_eq!(upcoming[1].id, future.id);

    let finished = EventRepo::list_past(&pool, today).await.unwrap();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].id, past.id);

    assert_eq!(EventRepo::count_upcoming(&pool, today).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Test: Registration lifecycle within a transaction
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_registration_lifecycle(pool: PgPool) {
    let creator = UserRepo::create(&pool, &new_user("eve", "eve@example.com"))
        .await
        .unwrap();
    let member = UserRepo::create(&pool, &new_user("mia", "mia@example.com"))
        .await
        .unwrap();
    let event = EventRepo::create(&pool, creator.id, &new_event("Workshop", 7))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    assert!(!EventRegistrationRepo::exists(&mut tx, member.id, event.id)
        .await
        .unwrap());
    let registration = EventRegistrationRepo::create(&mut tx, member.id, event.id)
        .await
        .unwrap();
    assert!(!registration.attended);
    assert_eq!(
        EventRegistrationRepo::count_for_event(&mut tx, event.id)
            .await
            .unwrap(),
        1
    );
    tx.commit().await.unwrap();

    let meta = EventRepo::find_with_meta(&pool, event.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(meta.registered_count, 1);

    let registered = EventRepo::list_registered_by(&pool, member.id).await.unwrap();
    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0].id, event.id);

    // Duplicate insert trips the unique constraint.
    let mut tx = pool.begin().await.unwrap();
    let duplicate = EventRegistrationRepo::create(&mut tx, member.id, event.id).await;
    assert!(duplicate.is_err());
    tx.rollback().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    assert!(EventRegistrationRepo::delete(&mut tx, member.id, event.id)
        .await
        .unwrap());
    tx.commit().await.unwrap();
    assert!(!EventRegistrationRepo::is_registered(&pool, member.id, event.id)
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Test: Attendance marking and roster
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_attendance_and_roster(pool: PgPool) {
    let creator = UserRepo::create(&pool, &new_user("eve", "eve@example.com"))
        .await
        .unwrap();
    let member = UserRepo::create(&pool, &new_user("mia", "mia@example.com"))
        .await
        .unwrap();
    let event = EventRepo::create(&pool, creator.id, &new_event("Workshop", 7))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    EventRegistrationRepo::create(&mut tx, member.id, event.id)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let marked = EventRegistrationRepo::set_attended(&pool, member.id, event.id, true)
        .await
        .unwrap()
        .unwrap();
    assert!(marked.attended);

    // No registration means nothing to mark.
    assert!(EventRegistrationRepo::set_attended(&pool, creator.id, event.id, true)
        .await
        .unwrap()
        .is_none());

    let roster = EventRegistrationRepo::list_for_event(&pool, event.id)
        .await
        .unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].username, "mia");
    assert!(roster[0].attended);

    assert_eq!(
        EventRegistrationRepo::count_attended_for_user(&pool, member.id)
            .await
            .unwrap(),
        1
    );
}

// ---------------------------------------------------------------------------
// Test: Gallery images follow the event
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_event_images_cascade(pool: PgPool) {
    let creator = UserRepo::create(&pool, &new_user("eve", "eve@example.com"))
        .await
        .unwrap();
    let event = EventRepo::create(&pool, creator.id, &new_event("Opening", 3))
        .await
        .unwrap();

    let image = EventImageRepo::create(
        &pool,
        event.id,
        &CreateEventImage {
            image_path: "/uploads/events/opening.png".to_string(),
            caption: "Crowd".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(image.caption, "Crowd");

    assert_eq!(
        EventImageRepo::list_for_event(&pool, event.id).await.unwrap().len(),
        1
    );

    assert!(EventRepo::delete(&pool, event.id).await.unwrap());
    assert!(EventImageRepo::list_for_event(&pool, event.id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Test: Partial event update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_event_partial(pool: PgPool) {
    let creator = UserRepo::create(&pool, &new_user("eve", "eve@example.com"))
        .await
        .unwrap();
    let event = EventRepo::create(&pool, creator.id, &new_event("Workshop", 7))
        .await
        .unwrap();

    let patch = UpdateEvent {
        location: Some("Main Hall".to_string()),
        capacity: Some(25),
        ..Default::default()
    };
    let updated = EventRepo::update(&pool, event.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.location, "Main Hall");
    assert_eq!(updated.capacity, Some(25));
    assert_eq!(updated.title, "Workshop");
}
