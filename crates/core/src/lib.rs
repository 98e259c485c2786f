//! Framework-free domain logic for the Atelier platform.
//!
//! Everything here is plain Rust with no database or HTTP dependencies so
//! the rules (moderation transitions, registration preconditions, role
//! ordering) can be unit tested in isolation and shared between crates.

pub mod activity;
pub mod categories;
pub mod error;
pub mod messages;
pub mod moderation;
pub mod registration;
pub mod roles;
pub mod types;
