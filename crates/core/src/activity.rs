//! Activity-log action name constants.
//!
//! These must match the CHECK constraint on `activity_logs.action`.

pub const ACTION_LOGIN: &str = "login";
pub const ACTION_LOGOUT: &str = "logout";
pub const ACTION_UPDATE: &str = "update";
pub const ACTION_CREATE: &str = "create";
pub const ACTION_DELETE: &str = "delete";

/// All recognized activity actions.
pub const ALL_ACTIONS: [&str; 5] = [
    ACTION_LOGIN,
    ACTION_LOGOUT,
    ACTION_UPDATE,
    ACTION_CREATE,
    ACTION_DELETE,
];

/// Whether `action` is one of the recognized activity actions.
pub fn is_valid_action(action: &str) -> bool {
    ALL_ACTIONS.contains(&action)
}
