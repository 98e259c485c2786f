//! Repository for the `users` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, first_name, last_name, email, password_hash, role, \
                        is_active, profile_picture, notification_preferences, date_joined, \
                        created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// New accounts are always inactive members; the schema defaults
    /// enforce this regardless of what the request carried.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, first_name, last_name, email, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (the login key, case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users, optionally restricted to one role, newest first.
    pub async fn list(
        pool: &PgPool,
        role: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let filter = if role.is_some() { "WHERE role = $3" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM users {filter} \
             ORDER BY date_joined DESC \
             LIMIT $1 OFFSET $2"
        );
        let mut q = sqlx::query_as::<_, User>(&query).bind(limit).bind(offset);
        if let Some(role) = role {
            q = q.bind(role);
        }
        q.fetch_all(pool).await
    }

    /// List active users, newest first. Backs the project member picker.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE is_active = true ORDER BY date_joined DESC"
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user's own profile. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
        password_hash: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                profile_picture = COALESCE($6, profile_picture),
                password_hash = COALESCE($7, password_hash),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.profile_picture)
            .bind(password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Set the activation flag. Returns `true` if the row was updated.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assign a new role, returning the updated row.
    pub async fn update_role(
        pool: &PgPool,
        id: DbId,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a user's notification preference document.
    pub async fn get_preferences(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar("SELECT notification_preferences FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Merge `patch` into a user's preference document, returning the result.
    ///
    /// Top-level keys in `patch` overwrite existing keys (JSONB `||`).
    pub async fn merge_preferences(
        pool: &PgPool,
        id: DbId,
        patch: &serde_json::Value,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users \
             SET notification_preferences = notification_preferences || $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING notification_preferences",
        )
        .bind(id)
        .bind(patch)
        .fetch_optional(pool)
        .await
    }

    /// Total number of user accounts.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Number of accounts that joined within `[from, to)`.
    pub async fn count_joined_between(
        pool: &PgPool,
        from: atelier_core::types::Timestamp,
        to: atelier_core::types::Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE date_joined >= $1 AND date_joined < $2")
            .bind(from)
            .bind(to)
            .fetch_one(pool)
            .await
    }

    /// Number of accounts awaiting activation.
    pub async fn count_inactive(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_active = false")
            .fetch_one(pool)
            .await
    }
}
