//! Data access layer.
//!
//! Each repository is a stateless struct with associated async functions
//! taking the pool (or an open transaction's connection) as the first
//! argument.

pub mod activity_log_repo;
pub mod artwork_repo;
pub mod event_image_repo;
pub mod event_registration_repo;
pub mod event_repo;
pub mod like_repo;
pub mod notification_repo;
pub mod project_progress_repo;
pub mod project_repo;
pub mod session_repo;
pub mod stats_repo;
pub mod user_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use artwork_repo::ArtworkRepo;
pub use event_image_repo::EventImageRepo;
pub use event_registration_repo::EventRegistrationRepo;
pub use event_repo::EventRepo;
pub use like_repo::LikeRepo;
pub use notification_repo::NotificationRepo;
pub use project_progress_repo::ProjectProgressRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
