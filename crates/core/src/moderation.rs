//! Artwork moderation state machine.
//!
//! An artwork is submitted as `pending` and is moved by an admin to
//! `approved` or `rejected`; once decided it never leaves that decision,
//! though repeating it is harmless. Rejection always carries feedback
//! for the artist.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Moderation status of an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    /// Database string representation (matches the `artworks.status` CHECK).
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    /// Parse the database representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ModerationStatus::Pending),
            "approved" => Some(ModerationStatus::Approved),
            "rejected" => Some(ModerationStatus::Rejected),
            _ => None,
        }
    }
}

/// Validate a moderation transition from `current` to `target`.
///
/// Legal moves are `pending -> approved`, `pending -> rejected`, and
/// repeating the decision an artwork already carries (a no-op the
/// handler treats as success). Crossing between terminal decisions is
/// rejected, and a rejection must carry non-blank feedback. Every error
/// maps to 400 at the API layer.
pub fn validate_transition(
    current: ModerationStatus,
    target: ModerationStatus,
    feedback: Option<&str>,
) -> Result<(), CoreError> {
    if target == ModerationStatus::Pending {
        return Err(CoreError::Validation(
            "Cannot move an artwork back to pending".into(),
        ));
    }

    if current != ModerationStatus::Pending && current != target {
        return Err(CoreError::Validation(format!(
            "Artwork is already {}",
            current.as_str()
        )));
    }

    if target == ModerationStatus::Rejected {
        let has_feedback = feedback.is_some_and(|f| !f.trim().is_empty());
        if !has_feedback {
            return Err(CoreError::Validation(
                "Feedback is required when rejecting an artwork".into(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use ModerationStatus::{Approved, Pending, Rejected};

    #[test]
    fn test_round_trip_strings() {
        for status in [Pending, Approved, Rejected] {
            assert_eq!(ModerationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ModerationStatus::parse("archived"), None);
    }

    #[test]
    fn test_pending_to_approved() {
        assert!(validate_transition(Pending, Approved, None).is_ok());
    }

    #[test]
    fn test_pending_to_rejected_requires_feedback() {
        assert_matches!(
            validate_transition(Pending, Rejected, None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_transition(Pending, Rejected, Some("   ")),
            Err(CoreError::Validation(_))
        );
        assert!(validate_transition(Pending, Rejected, Some("Too blurry")).is_ok());
    }

    #[test]
    fn test_no_crossing_between_terminal_states() {
        assert_matches!(
            validate_transition(Approved, Rejected, Some("late feedback")),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_transition(Rejected, Approved, None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_repeating_a_decision_is_a_noop() {
        assert!(validate_transition(Approved, Approved, None).is_ok());
        assert!(validate_transition(Rejected, Rejected, Some("still no")).is_ok());
        // Re-rejecting still needs feedback.
        assert_matches!(
            validate_transition(Rejected, Rejected, None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_back_to_pending_is_illegal() {
        assert_matches!(
            validate_transition(Pending, Pending, None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_transition(Approved, Pending, None),
            Err(CoreError::Validation(_))
        );
    }
}
