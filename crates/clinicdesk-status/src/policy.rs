//! Role-based transition authorization
//!
//! The transition graph in [`crate::status`] says what is legal; this module
//! says who may request it. The two are kept as separate layers: the same
//! graph is shared by every role, and the policy below only ever narrows the
//! graph's answer, never widens it.
//!
//! Policy:
//! - DOCTOR: any graph-legal transition.
//! - CLINIC_ADMIN: same as DOCTOR; clinic admins administratively own
//!   appointment records.
//! - PATIENT: may only cancel, and only while cancellation is graph-legal.
//! - No role: nothing.

use crate::role::ActorRole;
use crate::status::AppointmentStatus;

/// Transitions an actor of the given role may request from `current`.
///
/// Always a subset of `current.available_transitions()`, in the same order.
/// `None` (unauthenticated) gets an empty sequence.
pub fn authorized_transitions(
    current: AppointmentStatus,
    role: Option<ActorRole>,
) -> Vec<AppointmentStatus> {
    let legal = current.available_transitions();
    match role {
        Some(ActorRole::Doctor) | Some(ActorRole::ClinicAdmin) => legal.to_vec(),
        Some(ActorRole::Patient) => legal
            .iter()
            .copied()
            .filter(|status| *status == AppointmentStatus::Cancelled)
            .collect(),
        None => Vec::new(),
    }
}

/// Check whether a single transition is both graph-legal and permitted for
/// the role.
pub fn is_authorized(
    current: AppointmentStatus,
    requested: AppointmentStatus,
    role: Option<ActorRole>,
) -> bool {
    authorized_transitions(current, role).contains(&requested)
}
