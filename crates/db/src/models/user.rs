//! User entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub profile_picture: Option<String>,
    pub notification_preferences: serde_json::Value,
    pub date_joined: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub profile_picture: Option<String>,
    pub date_joined: Timestamp,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            username: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            role: u.role,
            is_active: u.is_active,
            profile_picture: u.profile_picture,
            date_joined: u.date_joined,
        }
    }
}

/// DTO for inserting a new user.
///
/// Role and activation state are deliberately absent: registration always
/// produces an inactive member, and only the dedicated admin endpoints
/// change either afterwards.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// DTO for a user updating their own profile. All fields optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    /// New plaintext password; hashed by the handler before persisting.
    pub password: Option<String>,
}
