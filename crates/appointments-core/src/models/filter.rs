//! Appointment list filters.

use serde::{Deserialize, Serialize};

use super::appointment::Appointment;

/// Optional criteria for listing appointments.
///
/// Every supplied criterion must hold for a record to match. `None` and the
/// empty string both mean "no constraint on this field".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFilter {
    /// Exact, case-sensitive match on `date`
    pub date: Option<String>,
    /// Case-insensitive exact match on `status`
    pub status: Option<String>,
    /// Case-insensitive substring match on `doctorName`
    pub doctor_name: Option<String>,
    /// Case-insensitive substring match on the patient `name`
    pub patient_name: Option<String>,
}

impl AppointmentFilter {
    /// A filter that matches every appointment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from the four optional criteria.
    pub fn from_options(
        date: Option<String>,
        status: Option<String>,
        doctor_name: Option<String>,
        patient_name: Option<String>,
    ) -> Self {
        Self {
            date,
            status,
            doctor_name,
            patient_name,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_doctor_name(mut self, doctor_name: impl Into<String>) -> Self {
        self.doctor_name = Some(doctor_name.into());
        self
    }

    pub fn with_patient_name(mut self, patient_name: impl Into<String>) -> Self {
        self.patient_name = Some(patient_name.into());
        self
    }

    /// True when no criterion constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        constraint(&self.date).is_none()
            && constraint(&self.status).is_none()
            && constraint(&self.doctor_name).is_none()
            && constraint(&self.patient_name).is_none()
    }

    /// Check a single appointment against every supplied criterion.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if let Some(date) = constraint(&self.date) {
            if appointment.date != date {
                return false;
            }
        }

        if let Some(status) = constraint(&self.status) {
            if appointment.status.to_lowercase() != status.to_lowercase() {
                return false;
            }
        }

        if let Some(doctor_name) = constraint(&self.doctor_name) {
            if !contains_ignore_case(&appointment.doctor_name, doctor_name) {
                return false;
            }
        }

        if let Some(patient_name) = constraint(&self.patient_name) {
            if !contains_ignore_case(&appointment.name, patient_name) {
                return false;
            }
        }

        true
    }
}

/// Empty text is treated the same as an absent criterion.
fn constraint(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
