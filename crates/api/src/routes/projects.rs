//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                 -> list_projects (public)
/// POST   /                 -> create_project
/// POST   /bulk-delete      -> bulk_delete
/// GET    /stats            -> project_stats
/// GET    /members          -> available_members
/// GET    /{id}             -> get_project (public)
/// PUT    /{id}             -> update_project (creator or admin)
/// DELETE /{id}             -> delete_project (creator or admin)
/// GET    /{id}/progress    -> list_progress (public)
/// POST   /{id}/progress    -> add_progress
/// POST   /{id}/complete    -> complete_project (creator)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list_projects).post(project::create_project))
        .route("/bulk-delete", post(project::bulk_delete))
        .route("/stats", get(project::project_stats))
        .route("/members", get(project::available_members))
        .route(
            "/{id}",
            get(project::get_project)
                .put(project::update_project)
                .delete(project::delete_project),
        )
        .route(
            "/{id}/progress",
            get(project::list_progress).post(project::add_progress),
        )
        .route("/{id}/complete", post(project::complete_project))
}
