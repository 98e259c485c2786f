//! Handlers for the admin activity log listing.

use atelier_core::types::DbId;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use atelier_db::models::activity_log::ActivityLog;
use atelier_db::repositories::ActivityLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for activity listing.
const MAX_LIMIT: i64 = 200;
/// Default page size for activity listing.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for `GET /activity`.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub user_id: Option<DbId>,
    /// Filter by action name (`login`, `logout`, `create`, `update`, `delete`).
    pub action: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/activity
///
/// Admin-only view of the append-only activity log, newest first.
pub async fn list_activity(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ActivityQuery>,
) -> AppResult<Json<DataResponse<Vec<ActivityLog>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let entries = ActivityLogRepo::list(
        &state.pool,
        params.user_id,
        params.action.as_deref(),
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: entries }))
}
