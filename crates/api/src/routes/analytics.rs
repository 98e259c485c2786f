//! Route definitions for the `/analytics` dashboards.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`.
///
/// ```text
/// GET /        -> admin_analytics (admin; ?date_from, ?date_to)
/// GET /member  -> member_analytics (member or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(analytics::admin_analytics))
        .route("/member", get(analytics::member_analytics))
}
