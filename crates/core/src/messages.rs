//! Notification type names and message builders.
//!
//! Every notification row is created by another module's state transition;
//! the wording lives here so handlers and tests agree on it.

/// Notification type identifiers stored in `notifications.notification_type`.
pub const TYPE_ARTWORK_APPROVED: &str = "artwork_approved";
pub const TYPE_ARTWORK_REJECTED: &str = "artwork_rejected";
pub const TYPE_EVENT_UPDATE: &str = "event_update";
pub const TYPE_EVENT_REGISTRATION: &str = "event_registration";
pub const TYPE_EVENT_UNREGISTRATION: &str = "event_unregistration";
pub const TYPE_EVENT_ATTENDANCE: &str = "event_attendance";
pub const TYPE_PROJECT_INVITE: &str = "project_invite";
pub const TYPE_GENERAL: &str = "general";

pub fn artwork_approved(title: &str) -> String {
    format!("Your artwork '{title}' has been approved.")
}

pub fn artwork_rejected(title: &str, feedback: &str) -> String {
    format!("Your artwork '{title}' has been rejected. Feedback: {feedback}")
}

pub fn event_updated(title: &str) -> String {
    format!("The event '{title}' has been updated.")
}

pub fn event_registered(title: &str) -> String {
    format!("You've successfully registered for {title}")
}

pub fn event_unregistered(title: &str) -> String {
    format!("You've unregistered from {title}")
}

pub fn event_attendance_confirmed(title: &str) -> String {
    format!("Your attendance for {title} has been confirmed")
}

pub fn project_invite(title: &str) -> String {
    format!("You have been added to the project '{title}'.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_carries_feedback() {
        let msg = artwork_rejected("Dusk", "Needs more contrast");
        assert!(msg.contains("'Dusk'"));
        assert!(msg.contains("Needs more contrast"));
    }
}
