//! Repository for the `event_images` gallery table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEventImage, EventImage};

const COLUMNS: &str = "id, event_id, image_path, caption, created_at";

/// Provides gallery image operations for events.
pub struct EventImageRepo;

impl EventImageRepo {
    /// Attach an image to an event, returning the created row.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateEventImage,
    ) -> Result<EventImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_images (event_id, image_path, caption) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventImage>(&query)
            .bind(event_id)
            .bind(&input.image_path)
            .bind(&input.caption)
            .fetch_one(pool)
            .await
    }

    /// Gallery for one event, oldest first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<EventImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM event_images \
             WHERE event_id = $1 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, EventImage>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Remove one image from an event's gallery.
    pub async fn delete(pool: &PgPool, event_id: DbId, image_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM event_images WHERE id = $1 AND event_id = $2")
            .bind(image_id)
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
