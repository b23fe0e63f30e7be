//! In-memory appointment store
//!
//! Thread-safe row store keyed by appointment id. The status column is only
//! written through [`MemoryStore::update_status`], a conditional update that
//! fails when the stored status no longer matches the status the caller's
//! decision was based on. Two UI actions racing to transition the same
//! appointment are resolved here, not in the state machine.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;
use uuid::Uuid;

use clinicdesk_status::{ActorRole, AppointmentStatus};

use crate::appointment::{Appointment, AppointmentError};

/// Errors for store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No appointment row with this id.
    #[error("appointment {0} not found")]
    NotFound(Uuid),

    /// An appointment with this id already exists.
    #[error("appointment {0} already exists")]
    AlreadyExists(Uuid),

    /// The stored status changed between the caller's read and this write.
    #[error("appointment status is {actual}, expected {expected}")]
    StatusConflict {
        expected: AppointmentStatus,
        actual: AppointmentStatus,
    },

    /// The transition itself was rejected.
    #[error(transparent)]
    Appointment(#[from] AppointmentError),
}

/// Thread-safe in-memory appointment store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<Uuid, Appointment>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new appointment row.
    pub fn insert(&self, appointment: Appointment) -> Result<(), StoreError> {
        let mut rows = self.inner.write().unwrap();
        if rows.contains_key(&appointment.id) {
            return Err(StoreError::AlreadyExists(appointment.id));
        }
        debug!(appointment = %appointment.id, "inserting appointment row");
        rows.insert(appointment.id, appointment);
        Ok(())
    }

    /// Read an appointment row by id.
    pub fn get(&self, id: Uuid) -> Option<Appointment> {
        self.inner.read().unwrap().get(&id).cloned()
    }

    /// Conditionally transition an appointment's status.
    ///
    /// `expected_current` is the status the caller read before deciding; if
    /// the row has moved on since, the update fails with `StatusConflict`
    /// and nothing is written. On success the updated row is returned.
    pub fn update_status(
        &self,
        id: Uuid,
        expected_current: AppointmentStatus,
        to: AppointmentStatus,
        role: Option<ActorRole>,
        cancellation_reason: Option<String>,
    ) -> Result<Appointment, StoreError> {
        let mut rows = self.inner.write().unwrap();
        let row = rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if row.status != expected_current {
            return Err(StoreError::StatusConflict {
                expected: expected_current,
                actual: row.status,
            });
        }

        match (to, cancellation_reason) {
            (AppointmentStatus::Cancelled, Some(reason)) => row.cancel(role, reason)?,
            _ => row.transition(to, role)?,
        }

        Ok(row.clone())
    }

    /// All appointments booked by a patient, newest first.
    pub fn list_for_patient(&self, patient_id: Uuid) -> Vec<Appointment> {
        self.list_by(|row| row.patient_id == patient_id)
    }

    /// All appointments assigned to a doctor, newest first.
    pub fn list_for_doctor(&self, doctor_id: Uuid) -> Vec<Appointment> {
        self.list_by(|row| row.doctor_id == doctor_id)
    }

    fn list_by(&self, keep: impl Fn(&Appointment) -> bool) -> Vec<Appointment> {
        let rows = self.inner.read().unwrap();
        let mut matched: Vec<Appointment> = rows.values().filter(|row| keep(row)).cloned().collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }

    /// Number of rows in the store.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn booked(store: &MemoryStore) -> Appointment {
        let start = Utc::now() + Duration::days(2);
        let appointment = Appointment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            start,
            start + Duration::minutes(20),
            None,
        );
        store.insert(appointment.clone()).unwrap();
        appointment
    }

    #[test]
    fn test_insert_and_get() {
        let store = MemoryStore::new();
        let appointment = booked(&store);

        let row = store.get(appointment.id).unwrap();
        assert_eq!(row, appointment);
        assert!(store.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_insert_duplicate_id_rejected() {
        let store = MemoryStore::new();
        let appointment = booked(&store);

        let err = store.insert(appointment.clone()).unwrap_err();
        assert_eq!(err, StoreError::AlreadyExists(appointment.id));
    }

    #[test]
    fn test_conditional_update_applies() {
        let store = MemoryStore::new();
        let appointment = booked(&store);

        let updated = store
            .update_status(
                appointment.id,
                AppointmentStatus::Pending,
                AppointmentStatus::Confirmed,
                Some(ActorRole::Doctor),
                None,
            )
            .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Confirmed);
        assert_eq!(store.get(appointment.id).unwrap().status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn test_stale_read_conflicts() {
        let store = MemoryStore::new();
        let appointment = booked(&store);

        // Another actor confirms first
        store
            .update_status(
                appointment.id,
                AppointmentStatus::Pending,
                AppointmentStatus::Confirmed,
                Some(ActorRole::ClinicAdmin),
                None,
            )
            .unwrap();

        // A write based on the stale PENDING read must not apply
        let err = store
            .update_status(
                appointment.id,
                AppointmentStatus::Pending,
                AppointmentStatus::Cancelled,
                Some(ActorRole::Patient),
                Some("changed my mind".to_string()),
            )
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::StatusConflict {
                expected: AppointmentStatus::Pending,
                actual: AppointmentStatus::Confirmed,
            }
        );
        assert_eq!(store.get(appointment.id).unwrap().status, AppointmentStatus::Confirmed);
    }

    #[test]
    fn test_denied_transition_leaves_row_unchanged() {
        let store = MemoryStore::new();
        let appointment = booked(&store);

        let err = store
            .update_status(
                appointment.id,
                AppointmentStatus::Pending,
                AppointmentStatus::Confirmed,
                Some(ActorRole::Patient),
                None,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Appointment(AppointmentError::NotAuthorized { .. })
        ));
        assert_eq!(store.get(appointment.id).unwrap().status, AppointmentStatus::Pending);
    }

    #[test]
    fn test_update_missing_row() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        let err = store
            .update_status(
                id,
                AppointmentStatus::Pending,
                AppointmentStatus::Confirmed,
                Some(ActorRole::Doctor),
                None,
            )
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound(id));
    }

    #[test]
    fn test_list_for_patient() {
        let store = MemoryStore::new();
        let patient_id = Uuid::new_v4();
        let start = Utc::now() + Duration::days(1);

        for _ in 0..3 {
            let appointment = Appointment::new(
                patient_id,
                Uuid::new_v4(),
                Uuid::new_v4(),
                start,
                start + Duration::minutes(15),
                None,
            );
            store.insert(appointment).unwrap();
        }
        booked(&store); // someone else's appointment

        assert_eq!(store.list_for_patient(patient_id).len(), 3);
        assert_eq!(store.len(), 4);
    }
}
