//! Handlers for the `/artworks` resource: submissions, moderation, and likes.

use atelier_core::activity::ACTION_CREATE;
use atelier_core::categories::is_valid_category;
use atelier_core::error::CoreError;
use atelier_core::messages;
use atelier_core::moderation::{validate_transition, ModerationStatus};
use atelier_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use atelier_db::models::artwork::{
    Artwork, ArtworkFilter, ArtworkStats, ArtworkWithMeta, CategoryStats, CreateArtwork,
    UpdateArtwork,
};
use atelier_db::repositories::{ActivityLogRepo, ArtworkRepo, LikeRepo, NotificationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for artwork listing.
const MAX_LIMIT: i64 = 100;
/// Default page size for artwork listing.
const DEFAULT_LIMIT: i64 = 50;
/// Number of artworks in the public featured strip.
const FEATURED_LIMIT: i64 = 6;

// ---------------------------------------------------------------------------
// Query / request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /artworks`.
#[derive(Debug, Deserialize)]
pub struct ArtworkListQuery {
    pub status: Option<String>,
    pub artist_id: Option<DbId>,
    pub category: Option<String>,
    /// Case-insensitive substring match over title and description.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `PATCH /artworks/{id}/reject`.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub feedback: Option<String>,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/artworks
pub async fn list_artworks(
    State(state): State<AppState>,
    Query(params): Query<ArtworkListQuery>,
) -> AppResult<Json<DataResponse<Vec<ArtworkWithMeta>>>> {
    let filter = ArtworkFilter {
        status: params.status,
        artist_id: params.artist_id,
        category: params.category,
        search: params.search,
        limit: params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        offset: params.offset.unwrap_or(0),
    };
    let artworks = ArtworkRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: artworks }))
}

/// POST /api/v1/artworks
///
/// Submit a new artwork. The caller is the artist and the status always
/// starts as pending.
pub async fn create_artwork(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateArtwork>,
) -> AppResult<(StatusCode, Json<DataResponse<Artwork>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be blank".into(),
        )));
    }
    if let Some(ref category) = input.category {
        if !is_valid_category(category) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown category: {category}"
            ))));
        }
    }

    let artwork = ArtworkRepo::create(&state.pool, auth.user_id, &input).await?;
    ActivityLogRepo::create(&state.pool, auth.user_id, ACTION_CREATE, Some("artwork")).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: artwork })))
}

/// GET /api/v1/artworks/{id}
pub async fn get_artwork(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ArtworkWithMeta>>> {
    let artwork = ArtworkRepo::find_with_meta(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;
    Ok(Json(DataResponse { data: artwork }))
}

/// PUT /api/v1/artworks/{id}
///
/// Admin update. A status change through this path goes through the same
/// transition validation and artist notification as the dedicated
/// approve/reject endpoints.
pub async fn update_artwork(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArtwork>,
) -> AppResult<Json<DataResponse<Artwork>>> {
    let existing = ArtworkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    if let Some(ref category) = input.category {
        if !is_valid_category(category) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown category: {category}"
            ))));
        }
    }

    // Validate any status change before touching the row.
    let target_status = match &input.status {
        Some(status) => {
            let target = ModerationStatus::parse(status).ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!("Unknown status: {status}")))
            })?;
            let current = ModerationStatus::parse(&existing.status)
                .ok_or_else(|| AppError::InternalError("Corrupt artwork status".into()))?;
            if target != current {
                validate_transition(current, target, input.feedback.as_deref())?;
                Some(target)
            } else {
                None
            }
        }
        None => None,
    };

    let artwork = ArtworkRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    match target_status {
        Some(ModerationStatus::Approved) => {
            NotificationRepo::create(
                &state.pool,
                artwork.artist_id,
                &messages::artwork_approved(&artwork.title),
                messages::TYPE_ARTWORK_APPROVED,
            )
            .await?;
        }
        Some(ModerationStatus::Rejected) => {
            let feedback = artwork.feedback.as_deref().unwrap_or_default();
            NotificationRepo::create(
                &state.pool,
                artwork.artist_id,
                &messages::artwork_rejected(&artwork.title, feedback),
                messages::TYPE_ARTWORK_REJECTED,
            )
            .await?;
        }
        _ => {}
    }

    Ok(Json(DataResponse { data: artwork }))
}

/// DELETE /api/v1/artworks/{id}
pub async fn delete_artwork(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ArtworkRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// PATCH /api/v1/artworks/{id}/approve
///
/// Move a pending artwork to approved and notify the artist. Approving
/// an already approved artwork repeats the notification; a rejected one
/// cannot be approved.
pub async fn approve_artwork(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Artwork>>> {
    moderate(&state, id, ModerationStatus::Approved, None).await
}

/// PATCH /api/v1/artworks/{id}/reject
///
/// Move a pending artwork to rejected. Feedback is mandatory and is sent
/// to the artist.
pub async fn reject_artwork(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<Json<DataResponse<Artwork>>> {
    moderate(&state, id, ModerationStatus::Rejected, input.feedback.as_deref()).await
}

/// Shared moderation flow: validate the transition, persist, notify.
async fn moderate(
    state: &AppState,
    id: DbId,
    target: ModerationStatus,
    feedback: Option<&str>,
) -> AppResult<Json<DataResponse<Artwork>>> {
    let existing = ArtworkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    let current = ModerationStatus::parse(&existing.status)
        .ok_or_else(|| AppError::InternalError("Corrupt artwork status".into()))?;
    validate_transition(current, target, feedback)?;

    let artwork = ArtworkRepo::set_status(&state.pool, id, target.as_str(), feedback)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    let (message, notification_type) = match target {
        ModerationStatus::Approved => (
            messages::artwork_approved(&artwork.title),
            messages::TYPE_ARTWORK_APPROVED,
        ),
        ModerationStatus::Rejected => (
            messages::artwork_rejected(&artwork.title, feedback.unwrap_or_default()),
            messages::TYPE_ARTWORK_REJECTED,
        ),
        // validate_transition rejects pending targets.
        ModerationStatus::Pending => unreachable!("validated above"),
    };
    NotificationRepo::create(&state.pool, artwork.artist_id, &message, notification_type).await?;

    tracing::info!(artwork_id = id, status = target.as_str(), "Artwork moderated");
    Ok(Json(DataResponse { data: artwork }))
}

// ---------------------------------------------------------------------------
// Collections and aggregates
// ---------------------------------------------------------------------------

/// GET /api/v1/artworks/mine
pub async fn my_artworks(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ArtworkWithMeta>>>> {
    let filter = ArtworkFilter {
        artist_id: Some(auth.user_id),
        limit: MAX_LIMIT,
        ..Default::default()
    };
    let artworks = ArtworkRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: artworks }))
}

/// GET /api/v1/artworks/featured
pub async fn featured_artworks(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ArtworkWithMeta>>>> {
    let artworks = ArtworkRepo::list_featured(&state.pool, FEATURED_LIMIT).await?;
    Ok(Json(DataResponse { data: artworks }))
}

/// GET /api/v1/artworks/stats
pub async fn artwork_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ArtworkStats>>> {
    let stats = ArtworkRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/artworks/pending-count
pub async fn pending_count(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let count = ArtworkRepo::count_pending(&state.pool).await?;
    Ok(Json(serde_json::json!({ "data": { "count": count } })))
}

/// GET /api/v1/artworks/categories
pub async fn category_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryStats>>>> {
    let stats = ArtworkRepo::category_stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

/// POST /api/v1/artworks/{id}/like
///
/// Like an artwork. Liking twice is rejected with 400 and writes nothing.
pub async fn like_artwork(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    // Confirm the artwork exists so likes of missing rows 404 rather
    // than failing on the foreign key.
    ArtworkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    let created = LikeRepo::create(&state.pool, auth.user_id, id).await?;
    if !created {
        return Err(AppError::Core(CoreError::Validation(
            "You have already liked this artwork".into(),
        )));
    }

    let count = LikeRepo::count_for_artwork(&state.pool, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": { "likes_count": count } })),
    ))
}

/// DELETE /api/v1/artworks/{id}/like
pub async fn unlike_artwork(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = LikeRepo::delete(&state.pool, auth.user_id, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Like",
            id,
        }));
    }
    let count = LikeRepo::count_for_artwork(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "data": { "likes_count": count } })))
}

/// GET /api/v1/artworks/{id}/likes
pub async fn like_count(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    ArtworkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;
    let count = LikeRepo::count_for_artwork(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "data": { "likes_count": count } })))
}

/// GET /api/v1/artworks/liked
pub async fn liked_artworks(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ArtworkWithMeta>>>> {
    let artworks = LikeRepo::list_liked_by(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: artworks }))
}
