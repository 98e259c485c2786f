//! Event-registration precondition checks.
//!
//! The checks run inside the registration transaction against a snapshot
//! of the event and the caller's registration state. They are pure so the
//! deadline/capacity edge cases can be tested without a database.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Snapshot of the fields relevant to a registration decision.
#[derive(Debug, Clone)]
pub struct EventSnapshot {
    /// Calendar date the event takes place.
    pub date: NaiveDate,
    /// Optional registration cutoff.
    pub registration_deadline: Option<Timestamp>,
    /// Optional attendee cap.
    pub capacity: Option<i32>,
    /// Current number of registrations.
    pub registered_count: i64,
}

/// Validate that a user may register for the event right now.
///
/// Checked in order: deadline passed, event already started, duplicate
/// registration, capacity reached. Every failure maps to 400 at the API
/// layer.
pub fn check_registration_open(
    event: &EventSnapshot,
    already_registered: bool,
    now: Timestamp,
) -> Result<(), CoreError> {
    if let Some(deadline) = event.registration_deadline {
        if now > deadline {
            return Err(CoreError::Validation(
                "Registration period has ended".into(),
            ));
        }
    }

    if event.date <= now.date_naive() {
        return Err(CoreError::Validation(
            "Cannot register for past events".into(),
        ));
    }

    if already_registered {
        return Err(CoreError::Validation(
            "Already registered for this event".into(),
        ));
    }

    if let Some(capacity) = event.capacity {
        if event.registered_count >= i64::from(capacity) {
            return Err(CoreError::Validation(
                "Event has reached maximum capacity".into(),
            ));
        }
    }

    Ok(())
}

/// Validate that a registered user may unregister from the event.
///
/// Unregistering from an event that already happened is rejected.
pub fn check_unregistration_open(event_date: NaiveDate, now: Timestamp) -> Result<(), CoreError> {
    if event_date <= now.date_naive() {
        return Err(CoreError::Validation(
            "Cannot unregister from past events".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn at_noon(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn open_event(now: Timestamp) -> EventSnapshot {
        EventSnapshot {
            date: (now + Duration::days(10)).date_naive(),
            registration_deadline: Some(now + Duration::days(5)),
            capacity: Some(3),
            registered_count: 0,
        }
    }

    #[test]
    fn test_registration_allowed() {
        let now = at_noon(2026, 3, 1);
        assert!(check_registration_open(&open_event(now), false, now).is_ok());
    }

    #[test]
    fn test_deadline_passed() {
        let now = at_noon(2026, 3, 1);
        let mut event = open_event(now);
        event.registration_deadline = Some(now - Duration::hours(1));
        assert_matches!(
            check_registration_open(&event, false, now),
            Err(CoreError::Validation(msg)) if msg.contains("Registration period")
        );
    }

    #[test]
    fn test_no_deadline_means_open_until_event() {
        let now = at_noon(2026, 3, 1);
        let mut event = open_event(now);
        event.registration_deadline = None;
        assert!(check_registration_open(&event, false, now).is_ok());
    }

    #[test]
    fn test_event_today_or_past() {
        let now = at_noon(2026, 3, 1);

        let mut event = open_event(now);
        event.date = now.date_naive();
        event.registration_deadline = None;
        assert_matches!(
            check_registration_open(&event, false, now),
            Err(CoreError::Validation(msg)) if msg.contains("past events")
        );

        event.date = (now - Duration::days(1)).date_naive();
        assert_matches!(
            check_registration_open(&event, false, now),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_duplicate_registration() {
        let now = at_noon(2026, 3, 1);
        assert_matches!(
            check_registration_open(&open_event(now), true, now),
            Err(CoreError::Validation(msg)) if msg.contains("Already registered")
        );
    }

    #[test]
    fn test_capacity_reached() {
        let now = at_noon(2026, 3, 1);
        let mut event = open_event(now);
        event.registered_count = 3;
        assert_matches!(
            check_registration_open(&event, false, now),
            Err(CoreError::Validation(msg)) if msg.contains("capacity")
        );

        // One seat left is still fine.
        event.registered_count = 2;
        assert!(check_registration_open(&event, false, now).is_ok());

        // No cap at all.
        event.capacity = None;
        event.registered_count = 10_000;
        assert!(check_registration_open(&event, false, now).is_ok());
    }

    #[test]
    fn test_unregistration_window() {
        let now = at_noon(2026, 3, 1);
        assert!(check_unregistration_open((now + Duration::days(1)).date_naive(), now).is_ok());
        assert_matches!(
            check_unregistration_open(now.date_naive(), now),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            check_unregistration_open((now - Duration::days(3)).date_naive(), now),
            Err(CoreError::Validation(_))
        );
    }
}
