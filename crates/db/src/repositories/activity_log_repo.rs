//! Repository for the append-only `activity_logs` table.

use atelier_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::activity_log::ActivityLog;

/// Column list for `activity_logs` queries.
const COLUMNS: &str = "id, user_id, action, resource, created_at";

/// Provides insert and query operations for activity logs.
///
/// There are deliberately no update or delete methods.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append an activity entry, returning the generated ID.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        action: &str,
        resource: Option<&str>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO activity_logs (user_id, action, resource) \
             VALUES ($1, $2, $3) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(action)
        .bind(resource)
        .fetch_one(pool)
        .await
    }

    /// List entries newest first, optionally filtered by user and action.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        action: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let mut conditions: Vec<&str> = Vec::new();
        if user_id.is_some() {
            conditions.push("user_id = $3");
        }
        if action.is_some() {
            conditions.push(if user_id.is_some() {
                "action = $4"
            } else {
                "action = $3"
            });
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs {where_clause} \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );

        let mut q = sqlx::query_as::<_, ActivityLog>(&query)
            .bind(limit)
            .bind(offset);
        if let Some(user_id) = user_id {
            q = q.bind(user_id);
        }
        if let Some(action) = action {
            q = q.bind(action);
        }
        q.fetch_all(pool).await
    }

    /// Most recent entries for one user.
    pub async fn list_recent_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most recent entries within a time range, for the analytics view.
    pub async fn list_recent_in_range(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs \
             WHERE created_at >= $1 AND created_at <= $2 \
             ORDER BY created_at DESC \
             LIMIT $3"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(from)
            .bind(to)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
