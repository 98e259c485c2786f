//! Artwork and Like entity models and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row from the `artworks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artwork {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image_path: String,
    pub artist_id: DbId,
    pub category: String,
    pub status: String,
    pub feedback: Option<String>,
    pub submitted_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Artwork joined with its artist's display name and like count, as
/// returned by list/detail endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtworkWithMeta {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image_path: String,
    pub artist_id: DbId,
    pub artist_name: String,
    pub category: String,
    pub status: String,
    pub feedback: Option<String>,
    pub submitted_at: Timestamp,
    pub likes_count: i64,
}

/// DTO for submitting a new artwork. Artist and status come from context.
#[derive(Debug, Deserialize)]
pub struct CreateArtwork {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_path: String,
    pub category: Option<String>,
}

/// DTO for the admin artwork update endpoint. All fields optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArtwork {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub feedback: Option<String>,
}

/// Filter parameters for artwork listing.
#[derive(Debug, Default)]
pub struct ArtworkFilter {
    pub status: Option<String>,
    pub artist_id: Option<DbId>,
    pub category: Option<String>,
    /// Case-insensitive substring match over title and description.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Per-status artwork counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtworkStats {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub total: i64,
}

/// Per-category moderation breakdown.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
    pub rejected: i64,
}
