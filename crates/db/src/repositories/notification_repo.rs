//! Repository for the `notifications` table.
//!
//! Creation has pool and in-transaction variants: moderation and
//! registration flows write the notification in the same transaction as
//! the state change they announce.

use atelier_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::notification::Notification;

const COLUMNS: &str = "id, recipient_id, message, notification_type, is_read, created_at";

/// Provides delivery and read-state operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Deliver a notification to one user.
    pub async fn create(
        pool: &PgPool,
        recipient_id: DbId,
        message: &str,
        notification_type: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (recipient_id, message, notification_type) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(recipient_id)
            .bind(message)
            .bind(notification_type)
            .fetch_one(pool)
            .await
    }

    /// Deliver a notification inside an open transaction.
    pub async fn create_in_tx(
        conn: &mut PgConnection,
        recipient_id: DbId,
        message: &str,
        notification_type: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (recipient_id, message, notification_type) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(recipient_id)
            .bind(message)
            .bind(notification_type)
            .fetch_one(conn)
            .await
    }

    /// Deliver the same message to every user holding one of the given
    /// roles, returning how many were created.
    pub async fn create_for_roles(
        pool: &PgPool,
        roles: &[String],
        message: &str,
        notification_type: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO notifications (recipient_id, message, notification_type) \
             SELECT id, $2, $3 FROM users \
             WHERE role = ANY($1)",
        )
        .bind(roles)
        .bind(message)
        .bind(notification_type)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// A user's notifications, newest first, optionally unread only.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let unread_clause = if unread_only { " AND NOT is_read" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE recipient_id = $1{unread_clause} \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark one notification read. Scoped to the recipient so users
    /// cannot touch each other's rows. Returns `true` if updated.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
        recipient_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = true WHERE id = $1 AND recipient_id = $2")
                .bind(id)
                .bind(recipient_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all of a user's notifications read, returning how many changed.
    pub async fn mark_all_read(pool: &PgPool, recipient_id: DbId) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = true WHERE recipient_id = $1 AND NOT is_read")
                .bind(recipient_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Unread count for the badge.
    pub async fn count_unread(pool: &PgPool, recipient_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND NOT is_read",
        )
        .bind(recipient_id)
        .fetch_one(pool)
        .await
    }
}
