//! Integration tests for the user repository.
//!
//! Exercises account creation defaults, the unique email constraint,
//! partial profile updates, activation, role changes, and the JSONB
//! preference merge.

use atelier_db::models::user::{CreateUser, UpdateProfile};
use atelier_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

fn new_user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: New accounts start as inactive members
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_defaults(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice", "alice@example.com"))
        .await
        .unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.role, "member");
    assert!(!user.is_active);
    assert_eq!(user.notification_preferences, json!({}));
}

// ---------------------------------------------------------------------------
// Test: Duplicate email rejected by unique constraint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_rejected(pool: PgPool) {
    UserRepo::create(&pool, &new_user("alice", "alice@example.com"))
        .await
        .unwrap();
    let result = UserRepo::create(&pool, &new_user("alice2", "alice@example.com")).await;
    assert!(result.is_err(), "Duplicate email should fail");
}

// ---------------------------------------------------------------------------
// Test: Lookup by email
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_find_by_email(pool: PgPool) {
    let created = UserRepo::create(&pool, &new_user("bob", "bob@example.com"))
        .await
        .unwrap();

    let found = UserRepo::find_by_email(&pool, "bob@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);

    assert!(UserRepo::find_by_email(&pool, "nobody@example.com")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: Partial profile update leaves other fields untouched
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_profile_partial(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("carol", "carol@example.com"))
        .await
        .unwrap();

    let patch = UpdateProfile {
        first_name: Some("Caroline".to_string()),
        ..Default::default()
    };
    let updated = UserRepo::update_profile(&pool, user.id, &patch, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.first_name, "Caroline");
    assert_eq!(updated.last_name, "User");
    assert_eq!(updated.email, "carol@example.com");
    assert_eq!(updated.password_hash, user.password_hash);
}

// ---------------------------------------------------------------------------
// Test: Activation flag and role assignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_set_active_and_role(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("dave", "dave@example.com"))
        .await
        .unwrap();

    assert!(UserRepo::set_active(&pool, user.id, true).await.unwrap());
    let promoted = UserRepo::update_role(&pool, user.id, "manager")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(promoted.role, "manager");
    assert!(promoted.is_active);

    // Unknown id updates nothing.
    assert!(!UserRepo::set_active(&pool, 9999, true).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: Preference merge overwrites top-level keys only
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_merge_preferences(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("erin", "erin@example.com"))
        .await
        .unwrap();

    let first = UserRepo::merge_preferences(&pool, user.id, &json!({"email_updates": true}))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first, json!({"email_updates": true}));

    let second = UserRepo::merge_preferences(
        &pool,
        user.id,
        &json!({"event_reminders": false, "email_updates": false}),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(
        second,
        json!({"email_updates": false, "event_reminders": false})
    );
}

// ---------------------------------------------------------------------------
// Test: Role filter on listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_filtered_by_role(pool: PgPool) {
    let a = UserRepo::create(&pool, &new_user("u1", "u1@example.com"))
        .await
        .unwrap();
    let b = UserRepo::create(&pool, &new_user("u2", "u2@example.com"))
        .await
        .unwrap();
    UserRepo::update_role(&pool, b.id, "manager").await.unwrap();

    let managers = UserRepo::list(&pool, Some("manager"), 50, 0).await.unwrap();
    assert_eq!(managers.len(), 1);
    assert_eq!(managers[0].id, b.id);

    let all = UserRepo::list(&pool, None, 50, 0).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|u| u.id == a.id));
}
