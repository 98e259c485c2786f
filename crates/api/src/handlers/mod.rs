//! Request handlers, one module per resource.

pub mod activity;
pub mod analytics;
pub mod artwork;
pub mod auth;
pub mod event;
pub mod notification;
pub mod project;
pub mod user;
