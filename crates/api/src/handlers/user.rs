//! Handlers for the `/users` resource: profiles, activation, roles, and
//! notification preferences.

use atelier_core::activity::ACTION_UPDATE;
use atelier_core::error::CoreError;
use atelier_core::roles::{can_change_activation, is_valid_role, ROLE_ADMIN, ROLE_MEMBER};
use atelier_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;

use atelier_db::models::user::{UpdateProfile, UserResponse};
use atelier_db::repositories::{ActivityLogRepo, SessionRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for user listing.
const MAX_LIMIT: i64 = 100;
/// Default page size for user listing.
const DEFAULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Query / request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    /// Restrict results to one role.
    pub role: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `PATCH /users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct RoleChangeRequest {
    pub role: String,
}

// ---------------------------------------------------------------------------
// Listing and detail
// ---------------------------------------------------------------------------

/// GET /api/v1/users
///
/// Admins see everyone; managers see members only; members are rejected.
pub async fn list_users(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<UserListQuery>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    // Managers only ever see the member roster, whatever they asked for.
    let role_filter = if auth.role == ROLE_ADMIN {
        params.role
    } else {
        Some(ROLE_MEMBER.to_string())
    };

    let users = UserRepo::list(&state.pool, role_filter.as_deref(), limit, offset).await?;
    let data = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

// ---------------------------------------------------------------------------
// Own profile
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/users/me
///
/// Update the caller's own profile. A new password, when present, is
/// validated and hashed before persisting.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let password_hash = match &input.password {
        Some(password) => {
            validate_password_strength(password)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input, password_hash.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    ActivityLogRepo::create(&state.pool, auth.user_id, ACTION_UPDATE, Some("profile")).await?;

    Ok(Json(DataResponse { data: user.into() }))
}

/// GET /api/v1/users/me/preferences
pub async fn get_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let prefs = UserRepo::get_preferences(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: prefs }))
}

/// PATCH /api/v1/users/me/preferences
///
/// Merge the submitted JSON object into the stored preference document.
pub async fn update_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(patch): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    if !patch.is_object() {
        return Err(AppError::Core(CoreError::Validation(
            "Preferences must be a JSON object".into(),
        )));
    }
    let prefs = UserRepo::merge_preferences(&state.pool, auth.user_id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: prefs }))
}

// ---------------------------------------------------------------------------
// Activation and roles
// ---------------------------------------------------------------------------

/// PATCH /api/v1/users/{id}/activate
pub async fn activate(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    set_activation(&state, &auth, id, true).await
}

/// PATCH /api/v1/users/{id}/deactivate
///
/// Also revokes the target's refresh sessions so a deactivated account
/// cannot mint new access tokens.
pub async fn deactivate(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let response = set_activation(&state, &auth, id, false).await?;
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(response)
}

/// Shared activation toggle with the manager/admin permission check.
async fn set_activation(
    state: &AppState,
    actor: &AuthUser,
    id: DbId,
    active: bool,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if !can_change_activation(&actor.role, &target.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Managers may only change member accounts".into(),
        )));
    }

    UserRepo::set_active(&state.pool, id, active).await?;
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(actor = actor.user_id, target = id, active, "Account activation changed");
    Ok(Json(DataResponse { data: user.into() }))
}

/// PATCH /api/v1/users/{id}/role
pub async fn change_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RoleChangeRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if !is_valid_role(&input.role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {}",
            input.role
        ))));
    }
    let user = UserRepo::update_role(&state.pool, id, &input.role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// GET /api/v1/users/stats
///
/// Total user count plus the percentage change of signups over the last
/// 30 days compared with the 30 days before that.
pub async fn user_stats(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let now = Utc::now();
    let month_ago = now - Duration::days(30);
    let two_months_ago = now - Duration::days(60);

    let total = UserRepo::count_all(&state.pool).await?;
    let recent = UserRepo::count_joined_between(&state.pool, month_ago, now).await?;
    let previous = UserRepo::count_joined_between(&state.pool, two_months_ago, month_ago).await?;

    let change_pct = if previous > 0 {
        ((recent - previous) as f64 / previous as f64) * 100.0
    } else if recent > 0 {
        100.0
    } else {
        0.0
    };

    Ok(Json(serde_json::json!({
        "data": {
            "total": total,
            "joined_last_30_days": recent,
            "change_pct": change_pct,
        }
    })))
}

/// GET /api/v1/users/pending-count
pub async fn pending_count(
    RequireStaff(_auth): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = UserRepo::count_inactive(&state.pool).await?;
    Ok(Json(serde_json::json!({ "data": { "count": count } })))
}
