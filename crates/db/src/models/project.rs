//! Project, member, and progress-update models and DTOs.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub creator_id: DbId,
    pub is_completed: bool,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project. Creator comes from the caller.
#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image_path: Option<String>,
    /// Initial member ids to attach.
    #[serde(default)]
    pub member_ids: Vec<DbId>,
}

/// DTO for updating a project. All fields optional; `member_ids`, when
/// present, replaces the member list.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image_path: Option<String>,
    pub is_completed: Option<bool>,
    pub member_ids: Option<Vec<DbId>>,
}

/// Row from the `project_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectProgress {
    pub id: DbId,
    pub project_id: DbId,
    pub description: String,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a progress update.
#[derive(Debug, Deserialize)]
pub struct CreateProjectProgress {
    pub description: String,
    pub image_path: Option<String>,
}

/// Aggregate counts for the project stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStats {
    pub total: i64,
    pub in_progress: i64,
    pub completed: i64,
    /// Projects started within the last 7 days.
    pub recent: i64,
    /// Caller's memberships; zero for staff.
    pub user_contributions: i64,
}
