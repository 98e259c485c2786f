//! Repository for the `projects` and `project_members` tables.
//!
//! Member list replacement runs inside a transaction so the diff used for
//! invite notifications matches what was actually written.

use atelier_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::user::User;

const COLUMNS: &str = "id, title, description, start_date, end_date, creator_id, \
                        is_completed, image_path, created_at, updated_at";

/// Provides CRUD and membership operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project inside an open transaction.
    ///
    /// Members come separately via [`ProjectRepo::add_members`] so the
    /// caller can diff and notify in the same transaction.
    pub async fn create(
        conn: &mut PgConnection,
        creator_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, start_date, end_date, creator_id, image_path)
             VALUES ($1, $2, COALESCE($3, CURRENT_DATE), $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(creator_id)
            .bind(&input.image_path)
            .fetch_one(conn)
            .await
    }

    /// Find a project row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, newest start date first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             ORDER BY start_date DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Projects the user created or belongs to, newest start date first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT p.* FROM (SELECT {COLUMNS} FROM projects) p \
             LEFT JOIN project_members m ON m.project_id = p.id \
             WHERE p.creator_id = $1 OR m.user_id = $1 \
             ORDER BY p.start_date DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update project fields. Only non-`None` scalar fields are applied;
    /// the member list is handled separately by [`ProjectRepo::replace_members`].
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                image_path = COALESCE($6, image_path),
                is_completed = COALESCE($7, is_completed),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.image_path)
            .bind(input.is_completed)
            .fetch_optional(conn)
            .await
    }

    /// Mark a project completed, setting the end date when absent.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects \
             SET is_completed = true, \
                 end_date = COALESCE(end_date, CURRENT_DATE), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a project (members and progress cascade).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete several projects at once, returning how many were removed.
    pub async fn delete_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Current member IDs, within a transaction.
    pub async fn member_ids(conn: &mut PgConnection, project_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT user_id FROM project_members WHERE project_id = $1 ORDER BY user_id")
            .bind(project_id)
            .fetch_all(conn)
            .await
    }

    /// Attach members inside an open transaction. Existing pairs are kept.
    pub async fn add_members(
        conn: &mut PgConnection,
        project_id: DbId,
        user_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if user_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO project_members (project_id, user_id) \
             SELECT $1, unnest($2::bigint[]) \
             ON CONFLICT ON CONSTRAINT uq_project_members_project_user DO NOTHING",
        )
        .bind(project_id)
        .bind(user_ids)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Replace the member list inside an open transaction, returning the
    /// IDs that are newly added (for invite notifications).
    pub async fn replace_members(
        conn: &mut PgConnection,
        project_id: DbId,
        user_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let current = Self::member_ids(conn, project_id).await?;
        let added: Vec<DbId> = user_ids
            .iter()
            .copied()
            .filter(|id| !current.contains(id))
            .collect();

        sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id != ALL($2)")
            .bind(project_id)
            .bind(user_ids)
            .execute(&mut *conn)
            .await?;
        Self::add_members(conn, project_id, &added).await?;
        Ok(added)
    }

    /// Members of a project, for the detail payload.
    pub async fn list_members(pool: &PgPool, project_id: DbId) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.first_name, u.last_name, u.email, u.password_hash, \
                    u.role, u.is_active, u.profile_picture, u.notification_preferences, \
                    u.date_joined, u.created_at, u.updated_at \
             FROM project_members m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.project_id = $1 \
             ORDER BY m.added_at ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Whether the user belongs to the project's member list.
    pub async fn is_member(pool: &PgPool, project_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM project_members \
             WHERE project_id = $1 AND user_id = $2)",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Aggregate counts: `(total, in_progress, completed, recent)` where
    /// recent means started within the last 7 days.
    pub async fn counts(pool: &PgPool) -> Result<(i64, i64, i64, i64), sqlx::Error> {
        sqlx::query_as::<_, (i64, i64, i64, i64)>(
            "SELECT COUNT(*), \
                    COUNT(*) FILTER (WHERE NOT is_completed), \
                    COUNT(*) FILTER (WHERE is_completed), \
                    COUNT(*) FILTER (WHERE start_date >= CURRENT_DATE - 7) \
             FROM projects",
        )
        .fetch_one(pool)
        .await
    }

    /// Number of projects the user belongs to or created.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(DISTINCT p.id) FROM projects p \
             LEFT JOIN project_members m ON m.project_id = p.id \
             WHERE p.creator_id = $1 OR m.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
