//! Appointment store integration tests.

use std::sync::{Arc, Mutex};

use appointments_core::models::{status, Appointment, AppointmentFilter, Timeframe};
use appointments_core::store::{
    seed_appointments, AppointmentStore, ChangeNotifier, DurableStore, StoreError,
    SEED_REFERENCE_DATE,
};
use chrono::NaiveDateTime;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn ids(appointments: &[Appointment]) -> Vec<i64> {
    appointments.iter().map(|a| a.id).collect()
}

fn seed_noon() -> NaiveDateTime {
    format!("{}T12:00:00", SEED_REFERENCE_DATE).parse().unwrap()
}

/// Stands in for a host's write-then-publish pipeline, recording call order.
#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl DurableStore for EventLog {
    fn persist(&self, appointment: &Appointment) {
        self.events
            .lock()
            .unwrap()
            .push(format!("persist {} {}", appointment.id, appointment.status));
    }
}

impl ChangeNotifier for EventLog {
    fn publish(&self, appointment: &Appointment) {
        self.events
            .lock()
            .unwrap()
            .push(format!("publish {} {}", appointment.id, appointment.status));
    }
}

#[test]
fn test_read_with_no_filters_returns_seed() {
    init_tracing();
    let store = AppointmentStore::seeded();

    let all = store.list(&AppointmentFilter::new());
    assert_eq!(all, seed_appointments());
}

#[test]
fn test_read_by_seed_date() {
    let store = AppointmentStore::seeded();

    let results = store.list(&AppointmentFilter::new().with_date("2025-12-15"));
    assert_eq!(ids(&results), vec![3, 4, 5]);
}

#[test]
fn test_confirm_then_read_back() {
    init_tracing();
    let mut store = AppointmentStore::seeded();
    assert_eq!(store.get(3).unwrap().status, status::UPCOMING);

    let updated = store.update_status(3, status::CONFIRMED).unwrap();
    assert_eq!(updated.id, 3);
    assert_eq!(updated.status, "Confirmed");

    let confirmed = store.list(&AppointmentFilter::new().with_status("confirmed"));
    assert_eq!(ids(&confirmed), vec![1, 3, 5, 9]);
}

#[test]
fn test_numeric_and_text_ids_are_equivalent() {
    let mut by_number = AppointmentStore::seeded();
    let mut by_text = AppointmentStore::seeded();

    let a = by_number.update_status(8, "Cancelled").unwrap();
    let b = by_text.update_status("8", "Cancelled").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_not_found_leaves_store_unchanged() {
    let mut store = AppointmentStore::seeded();

    let err = store.update_status("abc", "Confirmed").unwrap_err();
    assert_eq!(err, StoreError::NotFound("abc".into()));

    assert_eq!(store.list(&AppointmentFilter::new()), seed_appointments());
}

#[test]
fn test_combined_filters() {
    let store = AppointmentStore::seeded();

    let filter = AppointmentFilter::new()
        .with_doctor_name("PATEL")
        .with_status("upcoming");
    assert_eq!(ids(&store.list(&filter)), vec![8]);

    let filter = AppointmentFilter::new()
        .with_date("2025-12-16")
        .with_patient_name("park");
    assert_eq!(ids(&store.list(&filter)), vec![7]);
}

#[test]
fn test_hooks_run_persist_then_publish() {
    let log = Arc::new(EventLog::default());
    let mut store = AppointmentStore::seeded()
        .with_durable_store(log.clone())
        .with_notifier(log.clone());

    store.update_status(2, "Scheduled").unwrap();
    assert!(store.update_status(12, "Scheduled").is_err());
    store.update_status(10, "Cancelled").unwrap();

    assert_eq!(
        log.events(),
        vec![
            "persist 2 Scheduled",
            "publish 2 Scheduled",
            "persist 10 Cancelled",
            "publish 10 Cancelled",
        ]
    );
}

#[test]
fn test_timeframe_views_of_seed() {
    let store = AppointmentStore::seeded();
    let all = AppointmentFilter::new();
    let now = seed_noon();

    assert_eq!(ids(&store.list_in_timeframe(&all, Timeframe::Today, now)), vec![3, 4, 5]);
    assert_eq!(ids(&store.list_in_timeframe(&all, Timeframe::Past, now)), vec![1, 2]);
    assert_eq!(
        ids(&store.list_in_timeframe(&all, Timeframe::Upcoming, now)),
        vec![3, 4, 5, 6, 7, 8, 9, 10]
    );
}

#[test]
fn test_timeframe_combines_with_filter() {
    let store = AppointmentStore::seeded();
    let filter = AppointmentFilter::new().with_doctor_name("smith");

    let upcoming = store.list_in_timeframe(&filter, Timeframe::Upcoming, seed_noon());
    assert_eq!(ids(&upcoming), vec![3, 6, 9]);
}
