//! Row shapes for the cross-entity analytics queries.

use atelier_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// Number of users holding a given role.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleCount {
    pub role: String,
    pub count: i64,
}

/// Artwork submissions grouped by calendar month.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlyCount {
    /// First instant of the month (from `date_trunc`).
    pub month: Timestamp,
    pub count: i64,
}

/// Artwork counts per category for a single artist.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistCategoryCount {
    pub category: String,
    pub count: i64,
}
