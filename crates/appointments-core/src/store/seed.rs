//! Seed data and store construction from external records.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use super::AppointmentStore;
use crate::models::Appointment;

/// The date the built-in seed treats as "today".
pub const SEED_REFERENCE_DATE: &str = "2025-12-15";

/// Errors raised while building a store from seed records.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate appointment id: {0}")]
    DuplicateId(i64),

    #[error("Appointment {id} is missing required field `{field}`")]
    MissingField { id: i64, field: &'static str },
}

pub type SeedResult<T> = Result<T, SeedError>;

/// Check field presence and id uniqueness, returning the id → position index.
pub(crate) fn index_records(appointments: &[Appointment]) -> SeedResult<HashMap<i64, usize>> {
    let mut index = HashMap::with_capacity(appointments.len());
    for (position, appointment) in appointments.iter().enumerate() {
        if let Some(field) = appointment.missing_field() {
            return Err(SeedError::MissingField {
                id: appointment.id,
                field,
            });
        }
        if index.insert(appointment.id, position).is_some() {
            return Err(SeedError::DuplicateId(appointment.id));
        }
    }
    Ok(index)
}

impl AppointmentStore {
    /// Build a store from a JSON array of appointment records.
    pub fn from_json_str(json: &str) -> SeedResult<Self> {
        let appointments: Vec<Appointment> = serde_json::from_str(json)?;
        Self::new(appointments)
    }

    /// Build a store from a JSON file holding an array of appointment records.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> SeedResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: i64,
    name: &str,
    date: &str,
    time: &str,
    duration: u32,
    doctor_name: &str,
    status: &str,
    mode: &str,
) -> Appointment {
    Appointment {
        id,
        name: name.into(),
        date: date.into(),
        time: time.into(),
        duration,
        doctor_name: doctor_name.into(),
        status: status.into(),
        mode: mode.into(),
    }
}

/// The built-in fixture: two past appointments, three on
/// [`SEED_REFERENCE_DATE`], five after it.
#[rustfmt::skip]
pub fn seed_appointments() -> Vec<Appointment> {
    use crate::models::mode::{IN_PERSON, ONLINE};
    use crate::models::status::{CANCELLED, CONFIRMED, SCHEDULED, UPCOMING};

    vec![
        // Past
        record(1, "Alice Johnson", "2025-12-10", "09:00", 30, "Dr. Smith", CONFIRMED, IN_PERSON),
        record(2, "Brian Lee", "2025-12-12", "10:00", 45, "Dr. Patel", CANCELLED, ONLINE),
        // Today
        record(3, "Carmen Diaz", "2025-12-15", "09:30", 20, "Dr. Smith", UPCOMING, IN_PERSON),
        record(4, "Dmitri Ivanov", "2025-12-15", "11:00", 30, "Dr. Gomez", SCHEDULED, ONLINE),
        record(5, "Ella Chen", "2025-12-15", "16:15", 60, "Dr. Patel", CONFIRMED, IN_PERSON),
        // Upcoming
        record(6, "Farid Khan", "2025-12-16", "08:00", 30, "Dr. Smith", UPCOMING, ONLINE),
        record(7, "Grace Park", "2025-12-16", "14:00", 30, "Dr. Gomez", SCHEDULED, IN_PERSON),
        record(8, "Hector Ruiz", "2025-12-17", "13:00", 45, "Dr. Patel", UPCOMING, ONLINE),
        record(9, "Isabelle Moreau", "2025-12-18", "15:30", 30, "Dr. Smith", CONFIRMED, IN_PERSON),
        record(10, "Jamal Wright", "2025-12-19", "09:15", 30, "Dr. Gomez", SCHEDULED, ONLINE),
    ]
}
