//! Room-request status lifecycle primitives.
//!
//! A request is created `PENDING` and moves through exactly one update
//! operation into the other statuses. `PENDING` and `ACCEPTED` are the
//! "active" statuses that block new requests from or to the same
//! participant; the remaining four are terminal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a room request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
    Rejected,
    Cancelled,
    Approved,
}

impl RequestStatus {
    /// The database/API string form (uppercase).
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Accepted => "ACCEPTED",
            RequestStatus::Declined => "DECLINED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Cancelled => "CANCELLED",
            RequestStatus::Approved => "APPROVED",
        }
    }

    /// Terminal statuses admit no further transitions.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestStatus::Approved
                | RequestStatus::Rejected
                | RequestStatus::Declined
                | RequestStatus::Cancelled
        )
    }

    /// Active statuses block new requests involving the same participants.
    pub const fn is_active(self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Accepted)
    }
}

/// The statuses counted by the duplicate-request existence checks.
pub const ACTIVE_STATUSES: &[RequestStatus] = &[RequestStatus::Pending, RequestStatus::Accepted];

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RequestStatus::Pending),
            "ACCEPTED" => Ok(RequestStatus::Accepted),
            "DECLINED" => Ok(RequestStatus::Declined),
            "REJECTED" => Ok(RequestStatus::Rejected),
            "CANCELLED" => Ok(RequestStatus::Cancelled),
            "APPROVED" => Ok(RequestStatus::Approved),
            other => Err(CoreError::InvalidOperation(format!(
                "Unknown request status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_statuses() {
        for s in [
            RequestStatus::Pending,
            RequestStatus::Accepted,
            RequestStatus::Declined,
            RequestStatus::Rejected,
            RequestStatus::Cancelled,
            RequestStatus::Approved,
        ] {
            assert_eq!(s.as_str().parse::<RequestStatus>().unwrap(), s);
        }
    }

    #[test]
    fn test_unknown_status_fails() {
        assert!("OPEN".parse::<RequestStatus>().is_err());
        assert!("pending".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_terminal_and_active_partition() {
        assert!(RequestStatus::Pending.is_active());
        assert!(RequestStatus::Accepted.is_active());
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::Accepted.is_terminal());

        for s in [
            RequestStatus::Declined,
            RequestStatus::Rejected,
            RequestStatus::Cancelled,
            RequestStatus::Approved,
        ] {
            assert!(s.is_terminal(), "{s} must be terminal");
            assert!(!s.is_active(), "{s} must not be active");
        }
    }

    #[test]
    fn test_active_statuses_constant() {
        assert_eq!(ACTIVE_STATUSES.len(), 2);
        assert!(ACTIVE_STATUSES.contains(&RequestStatus::Pending));
        assert!(ACTIVE_STATUSES.contains(&RequestStatus::Accepted));
    }
}
