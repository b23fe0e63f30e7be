//! Appointment status enumeration and transition graph
//!
//! Statuses: PENDING → {CONFIRMED, CANCELLED},
//! CONFIRMED → {COMPLETED, CANCELLED, NO_SHOW},
//! with CANCELLED, COMPLETED, and NO_SHOW terminal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StatusError;

/// Appointment status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Appointment was created and awaits confirmation
    Pending,
    /// Appointment was confirmed by the clinic
    Confirmed,
    /// Appointment was cancelled (terminal)
    Cancelled,
    /// Consultation took place (terminal)
    Completed,
    /// Patient did not show up (terminal)
    NoShow,
}

impl AppointmentStatus {
    /// All statuses, in declaration order.
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
        AppointmentStatus::NoShow,
    ];

    /// Legal next statuses from this one, in fixed declaration order.
    ///
    /// The match below is the transition table: static, total over the
    /// enumeration, and the single source of truth for `can_transition_to`
    /// and the authorization policy. The ordering is stable so callers can
    /// render transition actions deterministically.
    pub fn available_transitions(self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Pending => {
                &[AppointmentStatus::Confirmed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Confirmed => &[
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ],
            // Terminal states have no outgoing edges
            AppointmentStatus::Cancelled
            | AppointmentStatus::Completed
            | AppointmentStatus::NoShow => &[],
        }
    }

    /// Check if transition from this status to target is valid.
    ///
    /// A status is never its own successor, and terminal statuses allow
    /// nothing.
    pub fn can_transition_to(self, target: AppointmentStatus) -> bool {
        self.available_transitions().contains(&target)
    }

    /// Check if this is a terminal status (no further transitions possible)
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Cancelled
                | AppointmentStatus::Completed
                | AppointmentStatus::NoShow
        )
    }

    /// Wire form of the status (SCREAMING_SNAKE_CASE).
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::NoShow => "NO_SHOW",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(AppointmentStatus::Pending),
            "CONFIRMED" => Ok(AppointmentStatus::Confirmed),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            "NO_SHOW" => Ok(AppointmentStatus::NoShow),
            _ => Err(StatusError::InvalidStatus(s.to_string())),
        }
    }
}

/// Transition check over untyped status values.
///
/// For callers holding raw row data. A value outside the enumeration is
/// surfaced as `InvalidStatus` rather than mapped to `false`, so upstream
/// data corruption is not masked as an ordinary denial.
pub fn can_transition_str(from: &str, to: &str) -> Result<bool, StatusError> {
    let from: AppointmentStatus = from.parse()?;
    let to: AppointmentStatus = to.parse()?;
    Ok(from.can_transition_to(to))
}
