//! Appointment record and guarded status transitions
//!
//! An appointment is created in PENDING and moves through the status graph
//! defined in `clinicdesk-status`. Every transition on the record goes
//! through [`Appointment::transition`], which checks graph legality first
//! and role authorization second, so a caller can tell "impossible" apart
//! from "not yours to do".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use clinicdesk_status::{authorized_transitions, ActorRole, AppointmentStatus, StatusError};

/// Schema version for serialized appointment records
pub const SCHEMA_VERSION: u32 = 1;

/// Errors for appointment operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    /// The requested transition does not exist in the status graph.
    #[error("invalid status transition from {from} to {to}")]
    TransitionDenied {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// The transition is graph-legal but not permitted for this actor.
    #[error("actor {actor} is not authorized to move an appointment from {from} to {to}")]
    NotAuthorized {
        actor: String,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// A status or role value failed to parse.
    #[error(transparent)]
    Status(#[from] StatusError),
}

/// A booked appointment between a patient and a doctor at a clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Schema version
    pub schema_version: u32,

    /// Appointment identifier
    pub id: Uuid,

    /// The patient who booked
    pub patient_id: Uuid,

    /// The doctor the appointment is with
    pub doctor_id: Uuid,

    /// The clinic that owns the record
    pub clinic_id: Uuid,

    /// Scheduled start of the consultation
    pub scheduled_start: DateTime<Utc>,

    /// Scheduled end of the consultation
    pub scheduled_end: DateTime<Utc>,

    /// Current status
    pub status: AppointmentStatus,

    /// Free-text notes entered by the patient at booking time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_notes: Option<String>,

    /// Human-entered reason recorded when the appointment was cancelled.
    /// Collected by the caller before the transition; the state machine
    /// itself never requires it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,

    /// When the appointment was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a new appointment in PENDING status.
    pub fn new(
        patient_id: Uuid,
        doctor_id: Uuid,
        clinic_id: Uuid,
        scheduled_start: DateTime<Utc>,
        scheduled_end: DateTime<Utc>,
        patient_notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            schema_version: SCHEMA_VERSION,
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            clinic_id,
            scheduled_start,
            scheduled_end,
            status: AppointmentStatus::Pending,
            patient_notes,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transition to a new status on behalf of an actor.
    ///
    /// Graph legality is checked before role authorization, so a terminal or
    /// otherwise impossible transition reports `TransitionDenied` for every
    /// role rather than `NotAuthorized`.
    pub fn transition(
        &mut self,
        to: AppointmentStatus,
        role: Option<ActorRole>,
    ) -> Result<(), AppointmentError> {
        debug!(appointment = %self.id, from = %self.status, %to, "validating status transition");

        if !self.status.can_transition_to(to) {
            warn!(appointment = %self.id, from = %self.status, %to, "illegal status transition");
            return Err(AppointmentError::TransitionDenied {
                from: self.status,
                to,
            });
        }

        if !authorized_transitions(self.status, role).contains(&to) {
            warn!(appointment = %self.id, actor = actor_label(role), %to, "unauthorized transition");
            return Err(AppointmentError::NotAuthorized {
                actor: actor_label(role).to_string(),
                from: self.status,
                to,
            });
        }

        info!(appointment = %self.id, from = %self.status, %to, "status transition applied");
        self.status = to;
        self.updated_at = Utc::now();

        Ok(())
    }

    /// Confirm the appointment (PENDING → CONFIRMED).
    pub fn confirm(&mut self, role: Option<ActorRole>) -> Result<(), AppointmentError> {
        self.transition(AppointmentStatus::Confirmed, role)
    }

    /// Mark the consultation as completed.
    pub fn complete(&mut self, role: Option<ActorRole>) -> Result<(), AppointmentError> {
        self.transition(AppointmentStatus::Completed, role)
    }

    /// Cancel the appointment, recording the caller-collected reason.
    pub fn cancel(
        &mut self,
        role: Option<ActorRole>,
        reason: impl Into<String>,
    ) -> Result<(), AppointmentError> {
        self.transition(AppointmentStatus::Cancelled, role)?;
        self.cancellation_reason = Some(reason.into());
        Ok(())
    }

    /// Record that the patient did not show up.
    pub fn mark_no_show(&mut self, role: Option<ActorRole>) -> Result<(), AppointmentError> {
        self.transition(AppointmentStatus::NoShow, role)
    }

    /// Check if the appointment is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn actor_label(role: Option<ActorRole>) -> &'static str {
    match role {
        Some(role) => role.as_str(),
        None => "ANONYMOUS",
    }
}
