//! Notification entity model.

use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub recipient_id: DbId,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}
