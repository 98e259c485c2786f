//! Repository for the append-only `project_progress` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProjectProgress, ProjectProgress};

const COLUMNS: &str = "id, project_id, description, image_path, created_at";

/// Provides progress-update operations for projects.
pub struct ProjectProgressRepo;

impl ProjectProgressRepo {
    /// Append a progress update, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateProjectProgress,
    ) -> Result<ProjectProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_progress (project_id, description, image_path) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectProgress>(&query)
            .bind(project_id)
            .bind(&input.description)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    /// Progress history for one project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_progress \
             WHERE project_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectProgress>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
