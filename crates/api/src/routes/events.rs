//! Route definitions for the `/events` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::event;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                        -> list_events (public)
/// POST   /                        -> create_event (admin)
/// GET    /upcoming                -> upcoming_events (public)
/// GET    /past                    -> past_events (public)
/// GET    /mine                    -> my_events
/// GET    /registered              -> registered_events
/// GET    /stats                   -> event_stats
/// GET    /upcoming-count          -> upcoming_count (public)
/// GET    /{id}                    -> get_event (public)
/// PUT    /{id}                    -> update_event (admin)
/// DELETE /{id}                    -> delete_event (admin)
/// POST   /{id}/register           -> register
/// POST   /{id}/unregister         -> unregister
/// GET    /{id}/registrations      -> registrations (admin)
/// POST   /{id}/attendance         -> mark_attendance (admin)
/// GET    /{id}/images             -> list_images (public)
/// POST   /{id}/images             -> add_image (admin)
/// DELETE /{id}/images/{image_id}  -> remove_image (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list_events).post(event::create_event))
        .route("/upcoming", get(event::upcoming_events))
        .route("/past", get(event::past_events))
        .route("/mine", get(event::my_events))
        .route("/registered", get(event::registered_events))
        .route("/stats", get(event::event_stats))
        .route("/upcoming-count", get(event::upcoming_count))
        .route(
            "/{id}",
            get(event::get_event)
                .put(event::update_event)
                .delete(event::delete_event),
        )
        .route("/{id}/register", post(event::register))
        .route("/{id}/unregister", post(event::unregister))
        .route("/{id}/registrations", get(event::registrations))
        .route("/{id}/attendance", post(event::mark_attendance))
        .route("/{id}/images", get(event::list_images).post(event::add_image))
        .route("/{id}/images/{image_id}", delete(event::remove_image))
}
