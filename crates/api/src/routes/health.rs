//! Liveness endpoint, mounted at the server root outside `/api/v1`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthReport {
    /// `"ok"` when every dependency answers, `"degraded"` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database answered a probe query.
    pub db_healthy: bool,
}

/// GET /health
///
/// Answers 200 while the database is reachable and 503 once it is not,
/// so an external monitor can act on the status line alone.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let db_healthy = match atelier_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Health probe could not reach the database");
            false
        }
    };

    let report = HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    };
    let code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
