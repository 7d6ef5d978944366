//! In-memory appointment store.
//!
//! Holds the appointment collection in insertion order and serves the
//! filtered read and the status update. Reads hand back clones, so nothing a
//! caller does to a result can reach the stored records.

mod hooks;
mod seed;

pub use hooks::*;
pub use seed::*;

use seed::index_records;

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Appointment, AppointmentFilter, Timeframe};

/// Store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Appointment {0} not found")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Ordered appointment collection with an id index.
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
    /// id → position in `appointments`
    index: HashMap<i64, usize>,
    hooks: UpdateHooks,
}

impl AppointmentStore {
    /// Build a store from records, checking id uniqueness and field presence.
    pub fn new(appointments: Vec<Appointment>) -> SeedResult<Self> {
        let index = index_records(&appointments)?;
        Ok(Self::from_parts(appointments, index))
    }

    /// Build a store holding the built-in seed appointments.
    pub fn seeded() -> Self {
        let appointments = seed_appointments();
        let index = appointments
            .iter()
            .enumerate()
            .map(|(position, appointment)| (appointment.id, position))
            .collect();
        Self::from_parts(appointments, index)
    }

    fn from_parts(appointments: Vec<Appointment>, index: HashMap<i64, usize>) -> Self {
        Self {
            appointments,
            index,
            hooks: UpdateHooks::default(),
        }
    }

    /// Replace the durable store invoked after each status update.
    pub fn with_durable_store(mut self, durable_store: impl DurableStore + 'static) -> Self {
        self.hooks.set_durable_store(Arc::new(durable_store));
        self
    }

    /// Replace the notifier invoked after each status update.
    pub fn with_notifier(mut self, notifier: impl ChangeNotifier + 'static) -> Self {
        self.hooks.set_notifier(Arc::new(notifier));
        self
    }

    /// Handles to the collaborators invoked after a status update.
    pub fn hooks(&self) -> UpdateHooks {
        self.hooks.clone()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Get a copy of the appointment with the given id.
    pub fn get(&self, id: i64) -> Option<Appointment> {
        self.index
            .get(&id)
            .map(|&position| self.appointments[position].clone())
    }

    /// List appointments matching every supplied criterion, in insertion order.
    ///
    /// An unconstrained filter returns the whole collection. An empty result
    /// is not an error.
    pub fn list(&self, filter: &AppointmentFilter) -> Vec<Appointment> {
        let results: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|appointment| filter.matches(appointment))
            .cloned()
            .collect();

        debug!(
            matched = results.len(),
            total = self.appointments.len(),
            unconstrained = filter.is_unconstrained(),
            "Listed appointments"
        );

        results
    }

    /// List appointments matching `filter` that fall in `timeframe` at `now`.
    pub fn list_in_timeframe(
        &self,
        filter: &AppointmentFilter,
        timeframe: Timeframe,
        now: NaiveDateTime,
    ) -> Vec<Appointment> {
        let results: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|appointment| filter.matches(appointment))
            .filter(|appointment| timeframe.contains(appointment, now))
            .cloned()
            .collect();

        debug!(
            ?timeframe,
            %now,
            matched = results.len(),
            "Listed appointments in timeframe"
        );

        results
    }

    /// Set the status of an appointment and return the updated record.
    ///
    /// `appointment_id` matches when its text form equals the record id's
    /// text form, so `3` and `"3"` both find id 3 while `"03"` does not.
    /// `new_status` is stored exactly as given.
    ///
    /// On success the durable store and then the notifier see the updated
    /// record. An unknown id leaves the collection untouched.
    pub fn update_status(
        &mut self,
        appointment_id: impl Display,
        new_status: impl Into<String>,
    ) -> StoreResult<Appointment> {
        let updated = self.apply_status(appointment_id, new_status)?;
        self.hooks.dispatch(&updated);
        Ok(updated)
    }

    /// Same as [`update_status`](Self::update_status) without invoking the
    /// hooks. Callers holding the store behind a lock use this, release the
    /// lock, then call [`UpdateHooks::dispatch`].
    pub fn apply_status(
        &mut self,
        appointment_id: impl Display,
        new_status: impl Into<String>,
    ) -> StoreResult<Appointment> {
        let requested = appointment_id.to_string();

        let Some(position) = self.position_of(&requested) else {
            warn!(appointment_id = %requested, "Appointment not found for status update");
            return Err(StoreError::NotFound(requested));
        };

        let appointment = &mut self.appointments[position];
        appointment.status = new_status.into();
        let updated = appointment.clone();

        info!(
            appointment_id = updated.id,
            status = %updated.status,
            "Updated appointment status"
        );

        Ok(updated)
    }

    fn position_of(&self, requested: &str) -> Option<usize> {
        let id: i64 = requested.parse().ok()?;
        let position = *self.index.get(&id)?;
        // "+3" and "03" parse to 3 but are not the same id text
        (self.appointments[position].id.to_string() == requested).then_some(position)
    }
}

impl Default for AppointmentStore {
    fn default() -> Self {
        Self::seeded()
    }
}
