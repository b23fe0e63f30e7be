//! clinicdesk - appointment booking engine
//!
//! This crate implements the appointment side of a multi-role clinic
//! booking application: the appointment record, the status lifecycle
//! (backed by the `clinicdesk-status` state machine), a thread-safe store
//! with conditional status updates, and application configuration.

pub mod appointment;
pub mod config;
pub mod store;

pub use appointment::{Appointment, AppointmentError};
pub use clinicdesk_status::{
    authorized_transitions, can_transition_str, is_authorized, ActorRole, AppointmentStatus,
    StatusError,
};
pub use config::{AppConfig, ConfigError};
pub use store::{MemoryStore, StoreError};
