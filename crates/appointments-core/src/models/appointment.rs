//! Appointment records and the timeframe views built on them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Text format of [`Appointment::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Text format of [`Appointment::time`] (24-hour clock).
pub const TIME_FORMAT: &str = "%H:%M";

/// Status values seen in practice. Not exhaustive: any text is a valid status.
pub mod status {
    pub const CONFIRMED: &str = "Confirmed";
    pub const CANCELLED: &str = "Cancelled";
    pub const UPCOMING: &str = "Upcoming";
    pub const SCHEDULED: &str = "Scheduled";
}

/// Visit modes seen in practice. Not exhaustive.
pub mod mode {
    pub const IN_PERSON: &str = "In-Person";
    pub const ONLINE: &str = "Online";
}

/// A scheduled encounter between a patient and a doctor.
///
/// Serialized field names match the boundary contract exactly
/// (`doctorName` rather than `doctor_name`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique, stable identifier
    pub id: i64,
    /// Patient display name
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Time of day, `HH:MM`
    pub time: String,
    /// Length in minutes
    pub duration: u32,
    /// Provider display name, may carry a title prefix ("Dr. Smith")
    pub doctor_name: String,
    /// Free-form status text
    pub status: String,
    /// Free-form visit mode text
    pub mode: String,
}

impl Appointment {
    /// Parse the `date` text, if well formed.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Parse `date` and `time` into a start instant, if both are well formed.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        let time = NaiveTime::parse_from_str(&self.time, TIME_FORMAT).ok()?;
        Some(self.start_date()?.and_time(time))
    }

    /// True when the appointment falls on `today`.
    ///
    /// Compares the raw `date` text, so a record with an unparseable date is
    /// only "today" if its text happens to equal the formatted date.
    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today.format(DATE_FORMAT).to_string()
    }

    /// True when the appointment started before `now`.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.starts_at().is_some_and(|start| start < now)
    }

    /// True when the appointment has not started yet, or is today.
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        !self.is_past(now) || self.is_today(now.date())
    }

    /// Name of the first required field that is empty, if any.
    ///
    /// Presence only: `date` and `time` are not checked against their formats.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.is_empty() {
            Some("name")
        } else if self.date.is_empty() {
            Some("date")
        } else if self.time.is_empty() {
            Some("time")
        } else if self.duration == 0 {
            Some("duration")
        } else if self.doctor_name.is_empty() {
            Some("doctorName")
        } else if self.status.is_empty() {
            Some("status")
        } else if self.mode.is_empty() {
            Some("mode")
        } else {
            None
        }
    }
}

/// The three views of the appointment board, relative to a reference instant.
///
/// `Today` overlaps `Upcoming`: an appointment later today shows in both, and
/// one earlier today still shows under `Upcoming` rather than `Past`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    /// Started before the reference instant, on an earlier day
    Past,
    /// On the reference date
    Today,
    /// Not yet started, or on the reference date
    Upcoming,
}

impl Timeframe {
    /// Check whether `appointment` belongs in this view at `now`.
    pub fn contains(self, appointment: &Appointment, now: NaiveDateTime) -> bool {
        match self {
            Timeframe::Past => appointment.is_past(now) && !appointment.is_today(now.date()),
            Timeframe::Today => appointment.is_today(now.date()),
            Timeframe::Upcoming => appointment.is_upcoming(now),
        }
    }
}
