//! Event, registration, and gallery image models and DTOs.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub cover_path: Option<String>,
    pub creator_id: DbId,
    pub is_completed: bool,
    pub registration_deadline: Option<Timestamp>,
    pub capacity: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Event joined with its current registration count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventWithMeta {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub cover_path: Option<String>,
    pub creator_id: DbId,
    pub is_completed: bool,
    pub registration_deadline: Option<Timestamp>,
    pub capacity: Option<i32>,
    pub registered_count: i64,
}

/// DTO for creating an event. Creator comes from the caller.
#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub date: NaiveDate,
    pub cover_path: Option<String>,
    pub registration_deadline: Option<Timestamp>,
    pub capacity: Option<i32>,
}

/// DTO for updating an event. All fields optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub cover_path: Option<String>,
    pub is_completed: Option<bool>,
    pub registration_deadline: Option<Timestamp>,
    pub capacity: Option<i32>,
}

/// Row from the `event_registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventRegistration {
    pub id: DbId,
    pub user_id: DbId,
    pub event_id: DbId,
    pub registered_at: Timestamp,
    pub attended: bool,
}

/// Registration joined with registrant identity, for the admin roster.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationEntry {
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub registered_at: Timestamp,
    pub attended: bool,
}

/// Row from the `event_images` gallery table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventImage {
    pub id: DbId,
    pub event_id: DbId,
    pub image_path: String,
    pub caption: String,
    pub created_at: Timestamp,
}

/// DTO for adding a gallery image to an event.
#[derive(Debug, Deserialize)]
pub struct CreateEventImage {
    pub image_path: String,
    #[serde(default)]
    pub caption: String,
}

/// Per-event participation counts for the stats endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParticipationStats {
    pub event_id: DbId,
    pub title: String,
    pub date: NaiveDate,
    pub participant_count: i64,
    pub attended_count: i64,
}
