//! Repository for the `likes` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::artwork::ArtworkWithMeta;

/// Provides like/unlike operations keyed by `(user, artwork)`.
pub struct LikeRepo;

impl LikeRepo {
    /// Record a like. Returns `false` when the pair already exists.
    pub async fn create(pool: &PgPool, user_id: DbId, artwork_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO likes (user_id, artwork_id) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_likes_user_artwork DO NOTHING",
        )
        .bind(user_id)
        .bind(artwork_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a like. Returns `false` when none existed.
    pub async fn delete(pool: &PgPool, user_id: DbId, artwork_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND artwork_id = $2")
            .bind(user_id)
            .bind(artwork_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the user has liked this artwork.
    pub async fn exists(pool: &PgPool, user_id: DbId, artwork_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND artwork_id = $2)",
        )
        .bind(user_id)
        .bind(artwork_id)
        .fetch_one(pool)
        .await
    }

    /// Number of likes on an artwork.
    pub async fn count_for_artwork(pool: &PgPool, artwork_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE artwork_id = $1")
            .bind(artwork_id)
            .fetch_one(pool)
            .await
    }

    /// Artworks the user has liked, most recently liked first.
    pub async fn list_liked_by(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ArtworkWithMeta>, sqlx::Error> {
        sqlx::query_as::<_, ArtworkWithMeta>(
            "SELECT a.id, a.title, a.description, a.image_path, a.artist_id, \
                    TRIM(u.first_name || ' ' || u.last_name) AS artist_name, \
                    a.category, a.status, a.feedback, a.submitted_at, \
                    (SELECT COUNT(*) FROM likes lc WHERE lc.artwork_id = a.id) AS likes_count \
             FROM likes l \
             JOIN artworks a ON a.id = l.artwork_id \
             JOIN users u ON u.id = a.artist_id \
             WHERE l.user_id = $1 \
             ORDER BY l.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Likes received across all of one artist's artworks.
    pub async fn count_received_by_artist(
        pool: &PgPool,
        artist_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM likes l \
             JOIN artworks a ON a.id = l.artwork_id \
             WHERE a.artist_id = $1",
        )
        .bind(artist_id)
        .fetch_one(pool)
        .await
    }
}
