//! Repository for the `artworks` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::artwork::{
    Artwork, ArtworkFilter, ArtworkStats, ArtworkWithMeta, CategoryStats, CreateArtwork,
    UpdateArtwork,
};

/// Column list for plain `artworks` queries.
const COLUMNS: &str = "id, title, description, image_path, artist_id, category, status, \
                        feedback, submitted_at, updated_at";

/// Column list for queries joined with artist name and like count.
/// Expects the `artworks` table aliased as `a`.
const META_COLUMNS: &str = "\
    a.id, a.title, a.description, a.image_path, a.artist_id, \
    TRIM(u.first_name || ' ' || u.last_name) AS artist_name, \
    a.category, a.status, a.feedback, a.submitted_at, \
    (SELECT COUNT(*) FROM likes l WHERE l.artwork_id = a.id) AS likes_count";

/// Typed bind value for the dynamically-built listing filter.
enum BindValue {
    BigInt(i64),
    Text(String),
}

/// Provides CRUD and aggregate operations for artworks.
pub struct ArtworkRepo;

impl ArtworkRepo {
    /// Insert a new submission for `artist_id`, returning the created row.
    ///
    /// Status always starts as `pending` (schema default).
    pub async fn create(
        pool: &PgPool,
        artist_id: DbId,
        input: &CreateArtwork,
    ) -> Result<Artwork, sqlx::Error> {
        let query = format!(
            "INSERT INTO artworks (title, description, image_path, artist_id, category)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'sketch'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_path)
            .bind(artist_id)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    /// Find an artwork row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artworks WHERE id = $1");
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an artwork with artist name and like count.
    pub async fn find_with_meta(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ArtworkWithMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM artworks a \
             JOIN users u ON u.id = a.artist_id \
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, ArtworkWithMeta>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List artworks newest first, with optional status/artist/category
    /// filters and substring search over title and description.
    pub async fn list(
        pool: &PgPool,
        filter: &ArtworkFilter,
    ) -> Result<Vec<ArtworkWithMeta>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_values: Vec<BindValue> = Vec::new();
        let mut bind_idx = 1u32;

        if let Some(ref status) = filter.status {
            conditions.push(format!("a.status = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Text(status.clone()));
        }
        if let Some(artist_id) = filter.artist_id {
            conditions.push(format!("a.artist_id = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::BigInt(artist_id));
        }
        if let Some(ref category) = filter.category {
            conditions.push(format!("a.category = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Text(category.clone()));
        }
        if let Some(ref search) = filter.search {
            conditions.push(format!(
                "(a.title ILIKE ${bind_idx} OR a.description ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
            bind_values.push(BindValue::Text(format!("%{search}%")));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {META_COLUMNS} FROM artworks a \
             JOIN users u ON u.id = a.artist_id \
             {where_clause} \
             ORDER BY a.submitted_at DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, ArtworkWithMeta>(&query);
        for val in &bind_values {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
            }
        }
        q.bind(filter.limit).bind(filter.offset).fetch_all(pool).await
    }

    /// Latest approved artworks, for the public featured strip.
    pub async fn list_featured(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ArtworkWithMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM artworks a \
             JOIN users u ON u.id = a.artist_id \
             WHERE a.status = 'approved' \
             ORDER BY a.submitted_at DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, ArtworkWithMeta>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update artwork fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Status changes
    /// through this path must be validated by the caller first.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArtwork,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!(
            "UPDATE artworks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                image_path = COALESCE($4, image_path),
                category = COALESCE($5, category),
                status = COALESCE($6, status),
                feedback = COALESCE($7, feedback),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_path)
            .bind(&input.category)
            .bind(&input.status)
            .bind(&input.feedback)
            .fetch_optional(pool)
            .await
    }

    /// Move an artwork to a new moderation status, storing feedback when
    /// present. Returns the updated row, or `None` when the id is unknown.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        feedback: Option<&str>,
    ) -> Result<Option<Artwork>, sqlx::Error> {
        let query = format!(
            "UPDATE artworks \
             SET status = $2, feedback = COALESCE($3, feedback), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artwork>(&query)
            .bind(id)
            .bind(status)
            .bind(feedback)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an artwork (likes cascade). Returns `true` if removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artworks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Per-status counts across all artworks.
    pub async fn stats(pool: &PgPool) -> Result<ArtworkStats, sqlx::Error> {
        sqlx::query_as::<_, ArtworkStats>(
            "SELECT \
                COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
                COUNT(*) FILTER (WHERE status = 'approved') AS approved, \
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected, \
                COUNT(*) AS total \
             FROM artworks",
        )
        .fetch_one(pool)
        .await
    }

    /// Per-category moderation breakdown, ordered by category name.
    pub async fn category_stats(pool: &PgPool) -> Result<Vec<CategoryStats>, sqlx::Error> {
        sqlx::query_as::<_, CategoryStats>(
            "SELECT category, \
                COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE status = 'approved') AS approved, \
                COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected \
             FROM artworks \
             GROUP BY category \
             ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }

    /// Number of artworks awaiting moderation.
    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM artworks WHERE status = 'pending'")
            .fetch_one(pool)
            .await
    }

    /// Total artwork count.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM artworks")
            .fetch_one(pool)
            .await
    }

    /// Artwork counts for one artist: `(total, approved)`.
    pub async fn artist_counts(pool: &PgPool, artist_id: DbId) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'approved') \
             FROM artworks WHERE artist_id = $1",
        )
        .bind(artist_id)
        .fetch_one(pool)
        .await
    }
}
