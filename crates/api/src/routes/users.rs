//! Route definitions for the `/users` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                    -> list_users (admin or manager)
/// GET    /me                  -> me
/// PUT    /me                  -> update_me
/// GET    /me/preferences      -> get_preferences
/// PATCH  /me/preferences      -> update_preferences
/// GET    /stats               -> user_stats (staff)
/// GET    /pending-count       -> pending_count (staff)
/// GET    /{id}                -> get_user
/// PATCH  /{id}/activate       -> activate (staff)
/// PATCH  /{id}/deactivate     -> deactivate (staff)
/// PATCH  /{id}/role           -> change_role (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users))
        .route("/me", get(user::me).put(user::update_me))
        .route(
            "/me/preferences",
            get(user::get_preferences).patch(user::update_preferences),
        )
        .route("/stats", get(user::user_stats))
        .route("/pending-count", get(user::pending_count))
        .route("/{id}", get(user::get_user))
        .route("/{id}/activate", patch(user::activate))
        .route("/{id}/deactivate", patch(user::deactivate))
        .route("/{id}/role", patch(user::change_role))
}
