//! Appointments Core Library
//!
//! In-memory appointment lookup and status update service, standing in for a
//! resolver + relational store + pub/sub backend.
//!
//! # Architecture
//!
//! ```text
//!   get_appointments(date?, status?, doctorName?, patientName?)
//!                │
//!                ▼
//!   ┌──────────────────────────┐        update_appointment_status(id, status)
//!   │     AppointmentStore     │ ◄────────────────────────────────────────
//!   │  ordered records + index │
//!   └────────────┬─────────────┘
//!                │ on successful update
//!        ┌───────┴────────┐
//!        ▼                ▼
//!   DurableStore     ChangeNotifier
//!   (no-op default)  (no-op default)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Appointment, AppointmentFilter, Timeframe)
//! - [`store`]: The appointment store, seed data and collaborator hooks
//! - [`config`]: Store configuration

pub mod config;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigError, SeedSource, StoreConfig};
pub use models::{Appointment, AppointmentFilter, Timeframe};
pub use store::{
    AppointmentStore, ChangeNotifier, DurableStore, SeedError, StoreError, StoreResult,
    UpdateHooks,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AppointmentsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppointmentsError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => AppointmentsError::NotFound(e.to_string()),
        }
    }
}

impl From<SeedError> for AppointmentsError {
    fn from(e: SeedError) -> Self {
        match e {
            SeedError::Json(_) => AppointmentsError::SerializationError(e.to_string()),
            _ => AppointmentsError::InvalidInput(e.to_string()),
        }
    }
}

impl From<ConfigError> for AppointmentsError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Seed(seed) => seed.into(),
            ConfigError::Parse(_) => AppointmentsError::InvalidInput(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppointmentsError {
    fn from(e: serde_json::Error) -> Self {
        AppointmentsError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AppointmentsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        AppointmentsError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a store holding the built-in seed appointments.
#[uniffi::export]
pub fn open_seeded_store() -> Arc<AppointmentsCore> {
    AppointmentsCore::from_store(AppointmentStore::seeded())
}

/// Open a store from a JSON array of appointment records.
#[uniffi::export]
pub fn open_store_from_json(json: String) -> Result<Arc<AppointmentsCore>, AppointmentsError> {
    let store = AppointmentStore::from_json_str(&json)?;
    Ok(AppointmentsCore::from_store(store))
}

/// Open a store described by a JSON [`StoreConfig`].
#[uniffi::export]
pub fn open_store_from_config(
    config_json: String,
) -> Result<Arc<AppointmentsCore>, AppointmentsError> {
    let store = StoreConfig::from_json(&config_json)?.build()?;
    Ok(AppointmentsCore::from_store(store))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct AppointmentsCore {
    store: Arc<Mutex<AppointmentStore>>,
}

impl AppointmentsCore {
    /// Wrap an existing store, e.g. one built with custom hooks.
    pub fn from_store(store: AppointmentStore) -> Arc<Self> {
        Arc::new(Self {
            store: Arc::new(Mutex::new(store)),
        })
    }
}

#[uniffi::export]
impl AppointmentsCore {
    // =========================================================================
    // Read Operations
    // =========================================================================

    /// List appointments matching every supplied filter, in insertion order.
    pub fn get_appointments(
        &self,
        date: Option<String>,
        status: Option<String>,
        doctor_name: Option<String>,
        patient_name: Option<String>,
    ) -> Result<Vec<FfiAppointment>, AppointmentsError> {
        let store = self.store.lock()?;
        let filter = AppointmentFilter::from_options(date, status, doctor_name, patient_name);
        Ok(store.list(&filter).into_iter().map(|a| a.into()).collect())
    }

    /// List filtered appointments in one board view.
    ///
    /// `now` is an ISO-8601 local date-time such as `2025-12-15T12:00:00`.
    pub fn get_appointments_in_timeframe(
        &self,
        date: Option<String>,
        status: Option<String>,
        doctor_name: Option<String>,
        patient_name: Option<String>,
        timeframe: FfiTimeframe,
        now: String,
    ) -> Result<Vec<FfiAppointment>, AppointmentsError> {
        let now: NaiveDateTime = now
            .parse()
            .map_err(|e| AppointmentsError::InvalidInput(format!("now `{}`: {}", now, e)))?;
        let store = self.store.lock()?;
        let filter = AppointmentFilter::from_options(date, status, doctor_name, patient_name);
        Ok(store
            .list_in_timeframe(&filter, timeframe.into(), now)
            .into_iter()
            .map(|a| a.into())
            .collect())
    }

    /// Get an appointment by ID.
    pub fn get_appointment(&self, id: i64) -> Result<Option<FfiAppointment>, AppointmentsError> {
        let store = self.store.lock()?;
        Ok(store.get(id).map(|a| a.into()))
    }

    /// Number of appointments held.
    pub fn count(&self) -> Result<u32, AppointmentsError> {
        let store = self.store.lock()?;
        checked_count(store.len())
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Set an appointment's status and return the updated record.
    ///
    /// The hooks run after the store lock is released, so they may call back
    /// into this object.
    pub fn update_appointment_status(
        &self,
        appointment_id: String,
        new_status: String,
    ) -> Result<FfiAppointment, AppointmentsError> {
        let (updated, hooks) = {
            let mut store = self.store.lock()?;
            let updated = store.apply_status(&appointment_id, new_status)?;
            (updated, store.hooks())
        };
        hooks.dispatch(&updated);
        Ok(updated.into())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export all appointments as a JSON array with boundary field names.
    pub fn export_appointments_json(&self) -> Result<String, AppointmentsError> {
        let store = self.store.lock()?;
        let all = store.list(&AppointmentFilter::new());
        Ok(serde_json::to_string(&all)?)
    }
}

fn checked_count(len: usize) -> Result<u32, AppointmentsError> {
    u32::try_from(len)
        .map_err(|e| AppointmentsError::Internal(format!("Appointment count {}: {}", len, e)))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe appointment.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiAppointment {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub doctor_name: String,
    pub status: String,
    pub mode: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            name: appointment.name,
            date: appointment.date,
            time: appointment.time,
            duration: appointment.duration,
            doctor_name: appointment.doctor_name,
            status: appointment.status,
            mode: appointment.mode,
        }
    }
}

/// FFI-safe board view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiTimeframe {
    Past,
    Today,
    Upcoming,
}

impl From<FfiTimeframe> for Timeframe {
    fn from(timeframe: FfiTimeframe) -> Self {
        match timeframe {
            FfiTimeframe::Past => Timeframe::Past,
            FfiTimeframe::Today => Timeframe::Today,
            FfiTimeframe::Upcoming => Timeframe::Upcoming,
        }
    }
}
