//! Handlers for the `/events` resource: CRUD, registration, attendance,
//! and the gallery.

use atelier_core::error::CoreError;
use atelier_core::messages;
use atelier_core::registration::{check_registration_open, check_unregistration_open, EventSnapshot};
use atelier_core::roles::ROLE_ADMIN;
use atelier_core::types::DbId;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use atelier_db::models::event::{
    CreateEvent, CreateEventImage, Event, EventImage, EventRegistration, EventWithMeta,
    RegistrationEntry, UpdateEvent,
};
use atelier_db::repositories::{
    EventImageRepo, EventRegistrationRepo, EventRepo, NotificationRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for event listing.
const MAX_LIMIT: i64 = 100;
/// Default page size for event listing.
const DEFAULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Query / request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /events`.
#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /events/{id}/attendance`.
#[derive(Debug, Deserialize)]
pub struct AttendanceRequest {
    pub user_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListQuery>,
) -> AppResult<Json<DataResponse<Vec<EventWithMeta>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let events = EventRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/events
pub async fn create_event(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<DataResponse<Event>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be blank".into(),
        )));
    }
    if let Some(capacity) = input.capacity {
        if capacity <= 0 {
            return Err(AppError::Core(CoreError::Validation(
                "Capacity must be positive".into(),
            )));
        }
    }
    let event = EventRepo::create(&state.pool, admin.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EventWithMeta>>> {
    let event = EventRepo::find_with_meta(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(DataResponse { data: event }))
}

/// PUT /api/v1/events/{id}
///
/// Update an event and notify every registered attendee.
pub async fn update_event(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<DataResponse<Event>>> {
    if let Some(capacity) = input.capacity {
        if capacity <= 0 {
            return Err(AppError::Core(CoreError::Validation(
                "Capacity must be positive".into(),
            )));
        }
    }

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    let roster = EventRegistrationRepo::list_for_event(&state.pool, id).await?;
    for entry in &roster {
        NotificationRepo::create(
            &state.pool,
            entry.user_id,
            &messages::event_updated(&event.title),
            messages::TYPE_EVENT_UPDATE,
        )
        .await?;
    }

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/events/{id}
pub async fn delete_event(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EventRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Event", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// GET /api/v1/events/upcoming
pub async fn upcoming_events(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EventWithMeta>>>> {
    let events = EventRepo::list_upcoming(&state.pool, Utc::now().date_naive()).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/past
pub async fn past_events(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EventWithMeta>>>> {
    let events = EventRepo::list_past(&state.pool, Utc::now().date_naive()).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/mine
pub async fn my_events(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EventWithMeta>>>> {
    let events = EventRepo::list_by_creator(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/registered
pub async fn registered_events(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EventWithMeta>>>> {
    let events = EventRepo::list_registered_by(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: events }))
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// POST /api/v1/events/{id}/register
///
/// All preconditions are checked and the row written inside one
/// transaction, so a failed check writes nothing.
pub async fn register(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<EventRegistration>>)> {
    let mut tx = state.pool.begin().await.map_err(AppError::Database)?;

    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    let already = EventRegistrationRepo::exists(&mut tx, auth.user_id, id).await?;
    let registered_count = EventRegistrationRepo::count_for_event(&mut tx, id).await?;

    let snapshot = EventSnapshot {
        date: event.date,
        registration_deadline: event.registration_deadline,
        capacity: event.capacity,
        registered_count,
    };
    check_registration_open(&snapshot, already, Utc::now())?;

    let registration = EventRegistrationRepo::create(&mut tx, auth.user_id, id).await?;
    NotificationRepo::create_in_tx(
        &mut tx,
        auth.user_id,
        &messages::event_registered(&event.title),
        messages::TYPE_EVENT_REGISTRATION,
    )
    .await?;

    tx.commit().await.map_err(AppError::Database)?;

    tracing::info!(user_id = auth.user_id, event_id = id, "Registered for event");
    Ok((StatusCode::CREATED, Json(DataResponse { data: registration })))
}

/// POST /api/v1/events/{id}/unregister
pub async fn unregister(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let mut tx = state.pool.begin().await.map_err(AppError::Database)?;

    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    check_unregistration_open(event.date, Utc::now())?;

    let removed = EventRegistrationRepo::delete(&mut tx, auth.user_id, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::Validation(
            "You are not registered for this event".into(),
        )));
    }

    NotificationRepo::create_in_tx(
        &mut tx,
        auth.user_id,
        &messages::event_unregistered(&event.title),
        messages::TYPE_EVENT_UNREGISTRATION,
    )
    .await?;

    tx.commit().await.map_err(AppError::Database)?;

    Ok(Json(serde_json::json!({
        "data": { "message": "Unregistered successfully" }
    })))
}

/// GET /api/v1/events/{id}/registrations
pub async fn registrations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<RegistrationEntry>>>> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    let roster = EventRegistrationRepo::list_for_event(&state.pool, id).await?;
    Ok(Json(DataResponse { data: roster }))
}

/// POST /api/v1/events/{id}/attendance
///
/// Mark a registrant as having attended and notify them.
pub async fn mark_attendance(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AttendanceRequest>,
) -> AppResult<Json<DataResponse<EventRegistration>>> {
    let user_id = input.user_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation("user_id is required".into()))
    })?;

    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    let registration = EventRegistrationRepo::set_attended(&state.pool, user_id, id, true)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id: user_id,
        }))?;

    NotificationRepo::create(
        &state.pool,
        user_id,
        &messages::event_attendance_confirmed(&event.title),
        messages::TYPE_EVENT_ATTENDANCE,
    )
    .await?;

    Ok(Json(DataResponse { data: registration }))
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// GET /api/v1/events/stats
///
/// Event totals and per-event participation. Non-admin callers also get
/// their own registered/attended counts.
pub async fn event_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();
    let total = EventRepo::count_all(&state.pool).await?;
    let upcoming = EventRepo::count_upcoming(&state.pool, today).await?;
    let participation = EventRepo::participation_stats(&state.pool).await?;

    let mut body = serde_json::json!({
        "total": total,
        "upcoming": upcoming,
        "completed": total - upcoming,
        "participation": participation,
    });

    if auth.role != ROLE_ADMIN {
        let registered = EventRegistrationRepo::count_for_user(&state.pool, auth.user_id).await?;
        let attended =
            EventRegistrationRepo::count_attended_for_user(&state.pool, auth.user_id).await?;
        body["my_registrations"] = serde_json::json!(registered);
        body["my_attended"] = serde_json::json!(attended);
    }

    Ok(Json(serde_json::json!({ "data": body })))
}

/// GET /api/v1/events/upcoming-count
pub async fn upcoming_count(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let count = EventRepo::count_upcoming(&state.pool, Utc::now().date_naive()).await?;
    Ok(Json(serde_json::json!({ "data": { "count": count } })))
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/images
pub async fn list_images(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<EventImage>>>> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    let images = EventImageRepo::list_for_event(&state.pool, id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/events/{id}/images
pub async fn add_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateEventImage>,
) -> AppResult<(StatusCode, Json<DataResponse<EventImage>>)> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    if input.image_path.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "image_path must not be blank".into(),
        )));
    }
    let image = EventImageRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// DELETE /api/v1/events/{id}/images/{image_id}
pub async fn remove_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = EventImageRepo::delete(&state.pool, id, image_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "EventImage",
            id: image_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
