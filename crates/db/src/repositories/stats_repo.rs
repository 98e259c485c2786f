//! Cross-entity aggregation queries for the analytics endpoints.

use atelier_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::stats::{ArtistCategoryCount, MonthlyCount, RoleCount};

/// Provides read-only aggregate queries spanning multiple tables.
pub struct StatsRepo;

impl StatsRepo {
    /// User counts grouped by role.
    pub async fn users_by_role(pool: &PgPool) -> Result<Vec<RoleCount>, sqlx::Error> {
        sqlx::query_as::<_, RoleCount>(
            "SELECT role, COUNT(*) AS count FROM users GROUP BY role ORDER BY role",
        )
        .fetch_all(pool)
        .await
    }

    /// Artwork submissions per calendar month, bucketed within the
    /// requested range.
    pub async fn artworks_by_month(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<MonthlyCount>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyCount>(
            "SELECT date_trunc('month', submitted_at) AS month, COUNT(*) AS count \
             FROM artworks \
             WHERE submitted_at BETWEEN $1 AND $2 \
             GROUP BY month \
             ORDER BY month",
        )
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }

    /// One artist's artwork counts grouped by category.
    pub async fn artist_categories(
        pool: &PgPool,
        artist_id: DbId,
    ) -> Result<Vec<ArtistCategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, ArtistCategoryCount>(
            "SELECT category, COUNT(*) AS count \
             FROM artworks \
             WHERE artist_id = $1 \
             GROUP BY category \
             ORDER BY category",
        )
        .bind(artist_id)
        .fetch_all(pool)
        .await
    }
}
