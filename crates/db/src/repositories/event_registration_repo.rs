//! Repository for the `event_registrations` table.
//!
//! Register/unregister checks run inside a transaction so the capacity
//! snapshot and the insert see the same state; those methods take a
//! `&mut PgConnection` instead of the pool.

use atelier_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::event::{EventRegistration, RegistrationEntry};

const COLUMNS: &str = "id, user_id, event_id, registered_at, attended";

/// Provides registration roster operations for events.
pub struct EventRegistrationRepo;

impl EventRegistrationRepo {
    /// Insert a registration inside an open transaction.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<EventRegistration, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_registrations (user_id, event_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventRegistration>(&query)
            .bind(user_id)
            .bind(event_id)
            .fetch_one(conn)
            .await
    }

    /// Remove a registration inside an open transaction.
    pub async fn delete(
        conn: &mut PgConnection,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM event_registrations WHERE user_id = $1 AND event_id = $2")
                .bind(user_id)
                .bind(event_id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the user already holds a registration, within a transaction.
    pub async fn exists(
        conn: &mut PgConnection,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM event_registrations \
             WHERE user_id = $1 AND event_id = $2)",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(conn)
        .await
    }

    /// Registration count for one event, within a transaction.
    pub async fn count_for_event(
        conn: &mut PgConnection,
        event_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM event_registrations WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(conn)
            .await
    }

    /// Roster for one event, oldest registration first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<RegistrationEntry>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationEntry>(
            "SELECT r.user_id, u.username, u.email, r.registered_at, r.attended \
             FROM event_registrations r \
             JOIN users u ON u.id = r.user_id \
             WHERE r.event_id = $1 \
             ORDER BY r.registered_at ASC",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
    }

    /// Whether the user is registered for this event (outside a transaction).
    pub async fn is_registered(
        pool: &PgPool,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM event_registrations \
             WHERE user_id = $1 AND event_id = $2)",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(pool)
        .await
    }

    /// Mark attendance. Returns the updated row, or `None` when the user
    /// holds no registration for this event.
    pub async fn set_attended(
        pool: &PgPool,
        user_id: DbId,
        event_id: DbId,
        attended: bool,
    ) -> Result<Option<EventRegistration>, sqlx::Error> {
        let query = format!(
            "UPDATE event_registrations SET attended = $3 \
             WHERE user_id = $1 AND event_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventRegistration>(&query)
            .bind(user_id)
            .bind(event_id)
            .bind(attended)
            .fetch_optional(pool)
            .await
    }

    /// Registrations held by one user, for the member analytics view.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM event_registrations WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Events the user attended, for the member analytics view.
    pub async fn count_attended_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM event_registrations WHERE user_id = $1 AND attended",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
