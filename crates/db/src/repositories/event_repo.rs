//! Repository for the `events` table.

use atelier_core::types::DbId;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, EventWithMeta, ParticipationStats, UpdateEvent};

/// Column list for plain `events` queries.
const COLUMNS: &str = "id, title, description, location, date, cover_path, creator_id, \
                        is_completed, registration_deadline, capacity, created_at, updated_at";

/// Column list joined with the registration count. Expects alias `e`.
const META_COLUMNS: &str = "\
    e.id, e.title, e.description, e.location, e.date, e.cover_path, e.creator_id, \
    e.is_completed, e.registration_deadline, e.capacity, \
    (SELECT COUNT(*) FROM event_registrations r WHERE r.event_id = e.id) AS registered_count";

/// Provides CRUD and aggregate operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event owned by `creator_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        creator_id: DbId,
        input: &CreateEvent,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events \
                (title, description, location, date, cover_path, creator_id, \
                 registration_deadline, capacity)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.date)
            .bind(&input.cover_path)
            .bind(creator_id)
            .bind(input.registration_deadline)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    /// Find an event row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an event with its registration count.
    pub async fn find_with_meta(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EventWithMeta>, sqlx::Error> {
        let query = format!("SELECT {META_COLUMNS} FROM events e WHERE e.id = $1");
        sqlx::query_as::<_, EventWithMeta>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all events, soonest date first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<EventWithMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM events e \
             ORDER BY e.date ASC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, EventWithMeta>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Events dated `today` or later, soonest first.
    pub async fn list_upcoming(
        pool: &PgPool,
        today: NaiveDate,
    ) -> Result<Vec<EventWithMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM events e \
             WHERE e.date >= $1 \
             ORDER BY e.date ASC"
        );
        sqlx::query_as::<_, EventWithMeta>(&query)
            .bind(today)
            .fetch_all(pool)
            .await
    }

    /// Events dated before `today`, most recent first.
    pub async fn list_past(
        pool: &PgPool,
        today: NaiveDate,
    ) -> Result<Vec<EventWithMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM events e \
             WHERE e.date < $1 \
             ORDER BY e.date DESC"
        );
        sqlx::query_as::<_, EventWithMeta>(&query)
            .bind(today)
            .fetch_all(pool)
            .await
    }

    /// Events created by one user, soonest first.
    pub async fn list_by_creator(
        pool: &PgPool,
        creator_id: DbId,
    ) -> Result<Vec<EventWithMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM events e \
             WHERE e.creator_id = $1 \
             ORDER BY e.date ASC"
        );
        sqlx::query_as::<_, EventWithMeta>(&query)
            .bind(creator_id)
            .fetch_all(pool)
            .await
    }

    /// Events the user holds a registration for, soonest first.
    pub async fn list_registered_by(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EventWithMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM events e \
             JOIN event_registrations r ON r.event_id = e.id \
             WHERE r.user_id = $1 \
             ORDER BY e.date ASC"
        );
        sqlx::query_as::<_, EventWithMeta>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update event fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                date = COALESCE($5, date),
                cover_path = COALESCE($6, cover_path),
                is_completed = COALESCE($7, is_completed),
                registration_deadline = COALESCE($8, registration_deadline),
                capacity = COALESCE($9, capacity),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.date)
            .bind(&input.cover_path)
            .bind(input.is_completed)
            .bind(input.registration_deadline)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an event (registrations and images cascade).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Per-event participation counts, soonest event first.
    pub async fn participation_stats(pool: &PgPool) -> Result<Vec<ParticipationStats>, sqlx::Error> {
        sqlx::query_as::<_, ParticipationStats>(
            "SELECT e.id AS event_id, e.title, e.date, \
                    COUNT(r.id) AS participant_count, \
                    COUNT(r.id) FILTER (WHERE r.attended) AS attended_count \
             FROM events e \
             LEFT JOIN event_registrations r ON r.event_id = e.id \
             GROUP BY e.id, e.title, e.date \
             ORDER BY e.date ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Number of events dated `today` or later.
    pub async fn count_upcoming(pool: &PgPool, today: NaiveDate) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE date >= $1")
            .bind(today)
            .fetch_one(pool)
            .await
    }

    /// Total event count.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(pool)
            .await
    }
}
