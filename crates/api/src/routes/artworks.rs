//! Route definitions for the `/artworks` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::artwork;
use crate::state::AppState;

/// Routes mounted at `/artworks`.
///
/// ```text
/// GET    /                 -> list_artworks (public)
/// POST   /                 -> create_artwork
/// GET    /mine             -> my_artworks
/// GET    /featured         -> featured_artworks (public)
/// GET    /liked            -> liked_artworks
/// GET    /stats            -> artwork_stats (admin)
/// GET    /pending-count    -> pending_count (public)
/// GET    /categories       -> category_stats (admin)
/// GET    /{id}             -> get_artwork (public)
/// PUT    /{id}             -> update_artwork (admin)
/// DELETE /{id}             -> delete_artwork (admin)
/// PATCH  /{id}/approve     -> approve_artwork (admin)
/// PATCH  /{id}/reject      -> reject_artwork (admin)
/// POST   /{id}/like        -> like_artwork
/// DELETE /{id}/like        -> unlike_artwork
/// GET    /{id}/likes       -> like_count (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(artwork::list_artworks).post(artwork::create_artwork))
        .route("/mine", get(artwork::my_artworks))
        .route("/featured", get(artwork::featured_artworks))
        .route("/liked", get(artwork::liked_artworks))
        .route("/stats", get(artwork::artwork_stats))
        .route("/pending-count", get(artwork::pending_count))
        .route("/categories", get(artwork::category_stats))
        .route(
            "/{id}",
            get(artwork::get_artwork)
                .put(artwork::update_artwork)
                .delete(artwork::delete_artwork),
        )
        .route("/{id}/approve", patch(artwork::approve_artwork))
        .route("/{id}/reject", patch(artwork::reject_artwork))
        .route(
            "/{id}/like",
            post(artwork::like_artwork).delete(artwork::unlike_artwork),
        )
        .route("/{id}/likes", get(artwork::like_count))
}
