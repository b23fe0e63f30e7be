//! Appointment status state machine.
//!
//! Defines the closed set of appointment statuses, the legal transition
//! graph between them, and the role-based authorization policy that narrows
//! graph-legal transitions to the subset a given actor may request.
//!
//! Status graph: PENDING → {CONFIRMED, CANCELLED},
//! CONFIRMED → {COMPLETED, CANCELLED, NO_SHOW}; the rest are terminal.
//!
//! This crate is a pure decision function over static configuration: no I/O,
//! no shared mutable state. Persisting an accepted transition (including any
//! compare-and-set against a concurrently updated row) is the caller's job.

pub mod error;
pub mod policy;
pub mod role;
pub mod status;

pub use error::StatusError;
pub use policy::{authorized_transitions, is_authorized};
pub use role::ActorRole;
pub use status::{can_transition_str, AppointmentStatus};
