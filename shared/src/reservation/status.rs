//! Reservation lifecycle status model
//!
//! Single source of truth mapping a raw status string to a progress step,
//! a display label and the user actions permitted in that state. The
//! client only ever *requests* one transition (`pending -> canceled`);
//! every other transition is staff-driven and merely observed over the
//! realtime feed.

use crate::error::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical reservation lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    ContractSigning,
    Ongoing,
    Completed,
    Done,
    Canceled,
}

impl ReservationStatus {
    /// All canonical states, in lifecycle order
    pub const ALL: [ReservationStatus; 7] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::ContractSigning,
        ReservationStatus::Ongoing,
        ReservationStatus::Completed,
        ReservationStatus::Done,
        ReservationStatus::Canceled,
    ];

    /// Parse a raw status string.
    ///
    /// Comparison is case-insensitive and treats underscores, spaces and
    /// hyphens as equivalent separators ("Contract Signing" ==
    /// "contract_signing"). This is the one normalization point; call
    /// sites must not re-implement it.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "contract_signing" => Some(Self::ContractSigning),
            "ongoing" => Some(Self::Ongoing),
            "completed" => Some(Self::Completed),
            "done" => Some(Self::Done),
            "canceled" | "cancelled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Parse a raw status string, falling back to `Pending`.
    ///
    /// An unrecognized or missing status is not an error: the UI degrades
    /// to the pending visual state. The fallback is logged so it stays
    /// visible in development.
    pub fn from_raw(raw: &str) -> Self {
        match Self::parse(raw) {
            Some(status) => status,
            None => {
                tracing::warn!(raw, "unrecognized reservation status, defaulting to pending");
                Self::Pending
            }
        }
    }

    /// Zero-based step index for the progress indicator.
    ///
    /// `Canceled` has no step of its own and maps to 0, the same fallback
    /// posture as an unknown status; display code that renders the
    /// canceled terminal view should use [`Self::progress_step`] instead.
    pub fn step_index(&self) -> usize {
        match self {
            Self::Pending => 0,
            Self::Confirmed => 1,
            Self::ContractSigning => 2,
            Self::Ongoing => 3,
            Self::Completed => 4,
            Self::Done => 5,
            Self::Canceled => 0,
        }
    }

    /// Step index for the progress indicator, `None` for `Canceled`
    /// (rendered as a distinct error-styled terminal view instead).
    pub fn progress_step(&self) -> Option<usize> {
        match self {
            Self::Canceled => None,
            other => Some(other.step_index()),
        }
    }

    /// Human display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::ContractSigning => "Contract Signing",
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
            Self::Done => "Done",
            Self::Canceled => "Canceled",
        }
    }

    /// Canonical snake_case form stored in the row
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::ContractSigning => "contract_signing",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }

    /// No further transitions are expected from these states
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Done | Self::Canceled)
    }

    // ==================== Action gating ====================

    /// "Cancel" is enabled only while the reservation is still pending
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// No staff is assigned while pending
    pub fn can_view_staff(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Requests can be made once staff has picked up the reservation
    pub fn can_make_request(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Validate a client-requested cancellation against the current
    /// (server-authoritative) status.
    ///
    /// The client never wins a race against a staff transition: if the
    /// status has already advanced past `pending`, the cancellation is
    /// rejected rather than applied last-write-wins.
    pub fn validate_cancel(&self) -> AppResult<()> {
        match self {
            Self::Pending => Ok(()),
            Self::Canceled => Err(AppError::business_rule(
                ErrorCode::ReservationAlreadyCanceled,
                "This reservation has already been canceled",
            )),
            other => Err(AppError::business_rule(
                ErrorCode::ReservationNotPending,
                format!(
                    "Cannot cancel: reservation has moved to \"{}\"",
                    other.label()
                ),
            )),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separator_variants() {
        assert_eq!(
            ReservationStatus::parse("contract_signing"),
            Some(ReservationStatus::ContractSigning)
        );
        assert_eq!(
            ReservationStatus::parse("Contract Signing"),
            Some(ReservationStatus::ContractSigning)
        );
        assert_eq!(
            ReservationStatus::parse("CONTRACT-SIGNING"),
            Some(ReservationStatus::ContractSigning)
        );
        assert_eq!(
            ReservationStatus::parse("  Pending "),
            Some(ReservationStatus::Pending)
        );
        assert_eq!(
            ReservationStatus::parse("cancelled"),
            Some(ReservationStatus::Canceled)
        );
    }

    #[test]
    fn test_step_index_totality() {
        // Every canonical state has a defined step index, case/separator varied.
        for status in ReservationStatus::ALL {
            let upper = status.as_str().to_uppercase();
            let spaced = status.as_str().replace('_', " ");
            assert_eq!(ReservationStatus::from_raw(&upper), status);
            assert_eq!(ReservationStatus::from_raw(&spaced), status);
            assert!(status.step_index() <= 5);
        }
        assert_eq!(ReservationStatus::Pending.step_index(), 0);
        assert_eq!(ReservationStatus::Confirmed.step_index(), 1);
        assert_eq!(ReservationStatus::ContractSigning.step_index(), 2);
        assert_eq!(ReservationStatus::Ongoing.step_index(), 3);
        assert_eq!(ReservationStatus::Completed.step_index(), 4);
        assert_eq!(ReservationStatus::Done.step_index(), 5);
    }

    #[test]
    fn test_unknown_status_falls_back_to_pending() {
        // Documented default, not an error.
        assert_eq!(
            ReservationStatus::from_raw("under_review"),
            ReservationStatus::Pending
        );
        assert_eq!(ReservationStatus::from_raw(""), ReservationStatus::Pending);
        assert_eq!(ReservationStatus::from_raw("under_review").step_index(), 0);
    }

    #[test]
    fn test_canceled_has_no_progress_step() {
        assert_eq!(ReservationStatus::Canceled.progress_step(), None);
        assert_eq!(ReservationStatus::Ongoing.progress_step(), Some(3));
    }

    #[test]
    fn test_action_gating() {
        let pending = ReservationStatus::Pending;
        assert!(pending.can_cancel());
        assert!(!pending.can_view_staff());
        assert!(!pending.can_make_request());

        let confirmed = ReservationStatus::Confirmed;
        assert!(!confirmed.can_cancel());
        assert!(confirmed.can_view_staff());
        assert!(confirmed.can_make_request());
    }

    #[test]
    fn test_terminal_states() {
        assert!(ReservationStatus::Completed.is_terminal());
        assert!(ReservationStatus::Done.is_terminal());
        assert!(ReservationStatus::Canceled.is_terminal());
        assert!(!ReservationStatus::Ongoing.is_terminal());
    }

    #[test]
    fn test_validate_cancel() {
        assert!(ReservationStatus::Pending.validate_cancel().is_ok());

        let err = ReservationStatus::Confirmed.validate_cancel().unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationNotPending);

        let err = ReservationStatus::Canceled.validate_cancel().unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationAlreadyCanceled);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ReservationStatus::ContractSigning).unwrap();
        assert_eq!(json, "\"contract_signing\"");
        let parsed: ReservationStatus = serde_json::from_str("\"ongoing\"").unwrap();
        assert_eq!(parsed, ReservationStatus::Ongoing);
    }
}
