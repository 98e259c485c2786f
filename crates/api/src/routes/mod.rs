pub mod analytics;
pub mod artworks;
pub mod auth;
pub mod events;
pub mod health;
pub mod notifications;
pub mod projects;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /users                               list (admin/manager)
/// /users/me                            own profile (get, update)
/// /users/me/preferences                notification preferences (get, patch)
/// /users/stats                         totals + 30-day change (staff)
/// /users/pending-count                 inactive account count (staff)
/// /users/{id}                          get
/// /users/{id}/activate                 activate account (staff)
/// /users/{id}/deactivate               deactivate account (staff)
/// /users/{id}/role                     change role (admin)
///
/// /activity                            activity log listing (admin)
///
/// /artworks                            list (public), submit
/// /artworks/mine                       own submissions
/// /artworks/featured                   latest approved (public)
/// /artworks/liked                      artworks the caller liked
/// /artworks/stats                      per-status counts (admin)
/// /artworks/pending-count              pending count (public)
/// /artworks/categories                 per-category breakdown (admin)
/// /artworks/{id}                       get (public), update, delete (admin)
/// /artworks/{id}/approve               approve pending (admin)
/// /artworks/{id}/reject                reject pending with feedback (admin)
/// /artworks/{id}/like                  like (POST), unlike (DELETE)
/// /artworks/{id}/likes                 like count (public)
///
/// /events                              list (public), create (admin)
/// /events/upcoming, /events/past       date-split listings (public)
/// /events/mine, /events/registered     caller-scoped listings
/// /events/stats                        totals + participation
/// /events/upcoming-count               upcoming count (public)
/// /events/{id}                         get (public), update, delete (admin)
/// /events/{id}/register                register (transactional)
/// /events/{id}/unregister              unregister (transactional)
/// /events/{id}/registrations           roster (admin)
/// /events/{id}/attendance              mark attended (admin)
/// /events/{id}/images                  gallery (public list, admin write)
/// /events/{id}/images/{image_id}       remove gallery image (admin)
///
/// /projects                            list (public), create
/// /projects/bulk-delete                bulk delete own projects
/// /projects/stats                      totals + caller contributions
/// /projects/members                    active users for the member picker
/// /projects/{id}                       get (public), update, delete
/// /projects/{id}/progress              history (public), append update
/// /projects/{id}/complete              mark completed (creator)
///
/// /notifications                       inbox (?unread_only, limit, offset)
/// /notifications/read-all              mark all read (PATCH)
/// /notifications/unread-count          unread count
/// /notifications/bulk                  role broadcast (admin)
/// /notifications/{id}/read             mark read (PATCH)
///
/// /analytics                           admin dashboard (?date_from, ?date_to)
/// /analytics/member                    member dashboard
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // User accounts, preferences, and role management.
        .nest("/users", users::router())
        // Admin activity log.
        .route("/activity", get(handlers::activity::list_activity))
        // Artwork gallery, moderation, and likes.
        .nest("/artworks", artworks::router())
        // Events, registrations, attendance, and gallery images.
        .nest("/events", events::router())
        // Collaborative projects, membership, and progress.
        .nest("/projects", projects::router())
        // Notification inbox and admin broadcast.
        .nest("/notifications", notifications::router())
        // Dashboards.
        .nest("/analytics", analytics::router())
}
