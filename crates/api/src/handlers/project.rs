//! Handlers for the `/projects` resource: CRUD, membership, progress
//! updates, and completion.

use atelier_core::activity::ACTION_DELETE;
use atelier_core::error::CoreError;
use atelier_core::messages;
use atelier_core::roles::ROLE_ADMIN;
use atelier_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use atelier_db::models::project::{
    CreateProject, CreateProjectProgress, Project, ProjectProgress, ProjectStats, UpdateProject,
};
use atelier_db::models::user::UserResponse;
use atelier_db::repositories::{
    ActivityLogRepo, NotificationRepo, ProjectProgressRepo, ProjectRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for project listing.
const MAX_LIMIT: i64 = 100;
/// Default page size for project listing.
const DEFAULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Query / request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /projects/bulk-delete`.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub project_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListQuery>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let projects = ProjectRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
///
/// Create a project with its initial member list; every initial member
/// receives an invite notification in the same transaction.
pub async fn create_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be blank".into(),
        )));
    }

    let mut tx = state.pool.begin().await.map_err(AppError::Database)?;
    let project = ProjectRepo::create(&mut tx, auth.user_id, &input).await?;
    ProjectRepo::add_members(&mut tx, project.id, &input.member_ids).await?;
    for member_id in &input.member_ids {
        NotificationRepo::create_in_tx(
            &mut tx,
            *member_id,
            &messages::project_invite(&project.title),
            messages::TYPE_PROJECT_INVITE,
        )
        .await?;
    }
    tx.commit().await.map_err(AppError::Database)?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let members: Vec<UserResponse> = ProjectRepo::list_members(&state.pool, id)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(serde_json::json!({
        "data": { "project": project, "members": members }
    })))
}

/// PUT /api/v1/projects/{id}
///
/// Update fields and, when `member_ids` is present, replace the member
/// list. Only members newly added by the replacement are notified.
pub async fn update_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let existing = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    require_owner_or_admin(&auth, existing.creator_id)?;

    let mut tx = state.pool.begin().await.map_err(AppError::Database)?;
    let project = ProjectRepo::update(&mut tx, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    if let Some(ref member_ids) = input.member_ids {
        let added = ProjectRepo::replace_members(&mut tx, id, member_ids).await?;
        for member_id in added {
            NotificationRepo::create_in_tx(
                &mut tx,
                member_id,
                &messages::project_invite(&project.title),
                messages::TYPE_PROJECT_INVITE,
            )
            .await?;
        }
    }
    tx.commit().await.map_err(AppError::Database)?;

    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    require_owner_or_admin(&auth, project.creator_id)?;

    ProjectRepo::delete(&state.pool, id).await?;
    ActivityLogRepo::create(&state.pool, auth.user_id, ACTION_DELETE, Some("project")).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/bulk-delete
///
/// Delete several projects at once. Only projects the caller created are
/// removed; the response carries how many were.
pub async fn bulk_delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if input.project_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "project_ids must not be empty".into(),
        )));
    }

    let mut owned = Vec::with_capacity(input.project_ids.len());
    for id in &input.project_ids {
        if let Some(project) = ProjectRepo::find_by_id(&state.pool, *id).await? {
            if project.creator_id == auth.user_id || auth.role == ROLE_ADMIN {
                owned.push(*id);
            }
        }
    }

    let deleted = if owned.is_empty() {
        0
    } else {
        ProjectRepo::delete_many(&state.pool, &owned).await?
    };

    Ok(Json(serde_json::json!({ "data": { "deleted": deleted } })))
}

// ---------------------------------------------------------------------------
// Progress and completion
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/progress
pub async fn list_progress(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectProgress>>>> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let history = ProjectProgressRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// POST /api/v1/projects/{id}/progress
pub async fn add_progress(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProjectProgress>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectProgress>>)> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    if input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Description must not be blank".into(),
        )));
    }
    let progress = ProjectProgressRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: progress })))
}

/// POST /api/v1/projects/{id}/complete
///
/// Only the creator may complete a project.
pub async fn complete_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    if project.creator_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project creator can complete it".into(),
        )));
    }

    let completed = ProjectRepo::complete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: completed }))
}

// ---------------------------------------------------------------------------
// Aggregates and membership
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/stats
pub async fn project_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ProjectStats>>> {
    let (total, in_progress, completed, recent) = ProjectRepo::counts(&state.pool).await?;
    let user_contributions = if auth.role == ROLE_ADMIN {
        0
    } else {
        ProjectRepo::count_for_user(&state.pool, auth.user_id).await?
    };

    Ok(Json(DataResponse {
        data: ProjectStats {
            total,
            in_progress,
            completed,
            recent,
            user_contributions,
        },
    }))
}

/// GET /api/v1/projects/members
///
/// Active users available for the member picker.
pub async fn available_members(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list_active(&state.pool).await?;
    let data = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject callers who neither created the project nor hold the admin role.
fn require_owner_or_admin(auth: &AuthUser, creator_id: DbId) -> Result<(), AppError> {
    if auth.user_id != creator_id && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project creator or an admin may do this".into(),
        )));
    }
    Ok(())
}
