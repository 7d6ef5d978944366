//! Collaborators invoked after a successful status update.
//!
//! A host system plugs in its own persistence and pub/sub here. After the
//! in-memory record has changed, [`UpdateHooks::dispatch`] calls
//! [`DurableStore::persist`] first, then [`ChangeNotifier::publish`], both
//! synchronously.
//!
//! `AppointmentsCore` dispatches after releasing its store lock, so a hook may
//! read the store back through it (e.g. a subscriber refetching the list).

use std::sync::Arc;

use crate::models::Appointment;

/// Durable persistence for updated appointments.
pub trait DurableStore: Send + Sync {
    /// Persist the updated record.
    fn persist(&self, appointment: &Appointment);
}

/// Change notification for subscribers of appointment updates.
///
/// May call back into `AppointmentsCore`; the store lock is not held.
pub trait ChangeNotifier: Send + Sync {
    /// Publish the updated record.
    fn publish(&self, appointment: &Appointment);
}

/// Durable store that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDurableStore;

impl DurableStore for NoopDurableStore {
    fn persist(&self, _appointment: &Appointment) {}
}

/// Notifier with no subscribers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChangeNotifier;

impl ChangeNotifier for NoopChangeNotifier {
    fn publish(&self, _appointment: &Appointment) {}
}

impl<T: DurableStore + ?Sized> DurableStore for Arc<T> {
    fn persist(&self, appointment: &Appointment) {
        (**self).persist(appointment)
    }
}

impl<T: ChangeNotifier + ?Sized> ChangeNotifier for Arc<T> {
    fn publish(&self, appointment: &Appointment) {
        (**self).publish(appointment)
    }
}

/// Shared handles to the collaborators of one store.
///
/// Cloning is cheap, so a caller holding the store behind a lock can take the
/// hooks out, release the lock, and only then dispatch.
#[derive(Clone)]
pub struct UpdateHooks {
    durable_store: Arc<dyn DurableStore>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl UpdateHooks {
    pub fn new(durable_store: Arc<dyn DurableStore>, notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self {
            durable_store,
            notifier,
        }
    }

    pub(crate) fn set_durable_store(&mut self, durable_store: Arc<dyn DurableStore>) {
        self.durable_store = durable_store;
    }

    pub(crate) fn set_notifier(&mut self, notifier: Arc<dyn ChangeNotifier>) {
        self.notifier = notifier;
    }

    /// Persist, then publish, the updated record.
    pub fn dispatch(&self, appointment: &Appointment) {
        self.durable_store.persist(appointment);
        self.notifier.publish(appointment);
    }
}

impl Default for UpdateHooks {
    fn default() -> Self {
        Self::new(Arc::new(NoopDurableStore), Arc::new(NoopChangeNotifier))
    }
}

