//! Activity log entity model.

use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the append-only `activity_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub resource: Option<String>,
    pub created_at: Timestamp,
}
