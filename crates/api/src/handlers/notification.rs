//! Handlers for the `/notifications` resource.
//!
//! Most notification rows are written by other modules (moderation,
//! event registration, project invites); this module covers the user
//! inbox plus the admin role-targeted broadcast.

use atelier_core::error::CoreError;
use atelier_core::roles::is_valid_role;
use atelier_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use atelier_db::models::notification::Notification;
use atelier_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for the inbox listing.
const MAX_LIMIT: i64 = 100;
/// Default page size for the inbox listing.
const DEFAULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Query / request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /notifications/bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkNotificationRequest {
    pub role: Option<String>,
    pub message: Option<String>,
    pub notification_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Inbox
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationListQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// PATCH /api/v1/notifications/{id}/read
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let updated = NotificationRepo::mark_read(&state.pool, id, auth.user_id).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(Json(serde_json::json!({ "data": { "read": true } })))
}

/// PATCH /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let marked = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "data": { "marked": marked } })))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::count_unread(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "data": { "count": count } })))
}

// ---------------------------------------------------------------------------
// Broadcast
// ---------------------------------------------------------------------------

/// POST /api/v1/notifications/bulk
///
/// Admin broadcast to every user holding the given role. Returns the
/// number of recipients.
pub async fn bulk_notify(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<BulkNotificationRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let role = match input.role.as_deref() {
        Some(r) if !r.trim().is_empty() => r.trim(),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Role is required".into(),
            )))
        }
    };
    if !is_valid_role(role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {role}"
        ))));
    }
    let message = match input.message.as_deref() {
        Some(m) if !m.trim().is_empty() => m.trim(),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Message is required".into(),
            )))
        }
    };
    let notification_type = input
        .notification_type
        .as_deref()
        .unwrap_or(atelier_core::messages::TYPE_GENERAL);

    let recipients = NotificationRepo::create_for_roles(
        &state.pool,
        &[role.to_string()],
        message,
        notification_type,
    )
    .await?;
    Ok(Json(
        serde_json::json!({ "data": { "recipients": recipients } }),
    ))
}
