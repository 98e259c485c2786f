//! Handlers for the `/analytics` dashboard endpoints.

use atelier_core::error::CoreError;
use atelier_core::roles::{ROLE_ADMIN, ROLE_MEMBER};
use atelier_core::types::Timestamp;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use atelier_db::repositories::{
    ActivityLogRepo, ArtworkRepo, EventRepo, LikeRepo, ProjectRepo, StatsRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// How many recent activity rows the admin dashboard shows.
const ADMIN_RECENT_ACTIVITY: i64 = 10;
/// How many recent activity rows the member dashboard shows.
const MEMBER_RECENT_ACTIVITY: i64 = 5;

/// Query parameters for `GET /analytics`.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// Inclusive range start, `YYYY-MM-DD`. Defaults to 30 days ago.
    pub date_from: Option<String>,
    /// Inclusive range end, `YYYY-MM-DD`. Defaults to today.
    pub date_to: Option<String>,
}

/// GET /api/v1/analytics
///
/// Admin dashboard: role distribution, entity totals, recent activity,
/// and monthly artwork submission counts over the requested range.
pub async fn admin_analytics(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();
    let from_date = match params.date_from.as_deref() {
        Some(raw) => parse_date("date_from", raw)?,
        None => today - Duration::days(30),
    };
    let to_date = match params.date_to.as_deref() {
        Some(raw) => parse_date("date_to", raw)?,
        None => today,
    };
    if from_date > to_date {
        return Err(AppError::Core(CoreError::Validation(
            "date_from must not be after date_to".into(),
        )));
    }
    let from = start_of_day(from_date);
    let to = end_of_day(to_date);

    let roles = StatsRepo::users_by_role(&state.pool).await?;
    let total_artworks = ArtworkRepo::count_all(&state.pool).await?;
    let pending_artworks = ArtworkRepo::count_pending(&state.pool).await?;
    let total_events = EventRepo::count_all(&state.pool).await?;
    let (total_projects, _, _, _) = ProjectRepo::counts(&state.pool).await?;
    let recent_activity =
        ActivityLogRepo::list_recent_in_range(&state.pool, from, to, ADMIN_RECENT_ACTIVITY)
            .await?;
    let monthly = StatsRepo::artworks_by_month(&state.pool, from, to).await?;

    Ok(Json(serde_json::json!({
        "data": {
            "date_from": from_date,
            "date_to": to_date,
            "users_by_role": roles,
            "total_artworks": total_artworks,
            "pending_artworks": pending_artworks,
            "total_events": total_events,
            "total_projects": total_projects,
            "recent_activity": recent_activity,
            "monthly_artworks": monthly,
        }
    })))
}

/// GET /api/v1/analytics/member
///
/// A member's own dashboard: artwork totals, approval rate, category
/// distribution, and their recent activity.
pub async fn member_analytics(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    if auth.role != ROLE_MEMBER && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Member analytics are only available to members".into(),
        )));
    }

    let (total, approved) = ArtworkRepo::artist_counts(&state.pool, auth.user_id).await?;
    let approval_rate = if total > 0 {
        (approved as f64 / total as f64 * 100.0).round()
    } else {
        0.0
    };
    let likes_received = LikeRepo::count_received_by_artist(&state.pool, auth.user_id).await?;
    let categories = StatsRepo::artist_categories(&state.pool, auth.user_id).await?;
    let recent_activity =
        ActivityLogRepo::list_recent_for_user(&state.pool, auth.user_id, MEMBER_RECENT_ACTIVITY)
            .await?;

    Ok(Json(serde_json::json!({
        "data": {
            "total_artworks": total,
            "approved_artworks": approved,
            "approval_rate": approval_rate,
            "likes_received": likes_received,
            "categories": categories,
            "recent_activity": recent_activity,
        }
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "{field} must be formatted YYYY-MM-DD"
        )))
    })
}

fn start_of_day(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> Timestamp {
    (date + Duration::days(1)).and_time(NaiveTime::MIN).and_utc() - Duration::seconds(1)
}
