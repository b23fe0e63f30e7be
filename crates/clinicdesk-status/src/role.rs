//! Actor roles for transition authorization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StatusError;

/// Role of the user attempting to drive a transition.
///
/// Unauthenticated callers carry no role at all (`Option<ActorRole>::None`)
/// and are denied every transition; "no role" is deliberately not a variant
/// here so it can never be granted by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    /// The patient who booked the appointment
    Patient,
    /// The doctor the appointment is with
    Doctor,
    /// An administrator of the clinic that owns the appointment record
    ClinicAdmin,
}

impl ActorRole {
    /// All roles, in declaration order.
    pub const ALL: [ActorRole; 3] = [
        ActorRole::Patient,
        ActorRole::Doctor,
        ActorRole::ClinicAdmin,
    ];

    /// Wire form of the role (SCREAMING_SNAKE_CASE).
    pub fn as_str(self) -> &'static str {
        match self {
            ActorRole::Patient => "PATIENT",
            ActorRole::Doctor => "DOCTOR",
            ActorRole::ClinicAdmin => "CLINIC_ADMIN",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorRole {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PATIENT" => Ok(ActorRole::Patient),
            "DOCTOR" => Ok(ActorRole::Doctor),
            "CLINIC_ADMIN" => Ok(ActorRole::ClinicAdmin),
            _ => Err(StatusError::InvalidRole(s.to_string())),
        }
    }
}
