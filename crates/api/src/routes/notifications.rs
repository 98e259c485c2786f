//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication; the bulk broadcast is admin only.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /               -> list_notifications (?unread_only, limit, offset)
/// PATCH  /read-all       -> mark_all_read
/// GET    /unread-count   -> unread_count
/// POST   /bulk           -> bulk_notify (admin)
/// PATCH  /{id}/read      -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list_notifications))
        .route("/read-all", patch(notification::mark_all_read))
        .route("/unread-count", get(notification::unread_count))
        .route("/bulk", post(notification::bulk_notify))
        .route("/{id}/read", patch(notification::mark_read))
}
