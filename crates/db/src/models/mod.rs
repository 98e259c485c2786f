//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod activity_log;
pub mod artwork;
pub mod event;
pub mod notification;
pub mod project;
pub mod session;
pub mod stats;
pub mod user;
