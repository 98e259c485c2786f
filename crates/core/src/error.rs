//! Domain-level error type shared across crates.

use crate::types::DbId;

/// Errors produced by domain logic, independent of HTTP or the database.
///
/// The API layer maps these onto status codes (404, 400, 401, 403, 500);
/// duplicate-row conflicts (409) surface through the database layer
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
