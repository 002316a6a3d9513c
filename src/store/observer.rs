//! Change observers.
//!
//! Observers are told about every committed change, in registration order.
//! An observer that fails (returns an error or panics) is logged and skipped;
//! the remaining observers still run and the commit stands.

use std::panic::{self, AssertUnwindSafe};

use log::warn;
use thiserror::Error;

use crate::core::TrackerState;

/// Unique identifier for a registered observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub u32);

impl SubscriberId {
    /// Create a new subscriber ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscriber({})", self.0)
    }
}

/// Failure reported by an observer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("observer failed: {message}")]
pub struct ObserverError {
    pub message: String,
}

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Something that wants to see each committed state.
pub trait StateObserver {
    /// Called with the state right after a commit.
    fn on_change(&mut self, state: &TrackerState) -> Result<(), ObserverError>;
}

impl<F> StateObserver for F
where
    F: FnMut(&TrackerState) -> Result<(), ObserverError>,
{
    fn on_change(&mut self, state: &TrackerState) -> Result<(), ObserverError> {
        self(state)
    }
}

/// Registered observers, kept in registration order.
#[derive(Default)]
pub struct ObserverList {
    entries: Vec<(SubscriberId, Box<dyn StateObserver>)>,
    next_id: u32,
}

impl ObserverList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer and return its handle.
    pub fn add(&mut self, observer: Box<dyn StateObserver>) -> SubscriberId {
        let id = SubscriberId::new(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Drop an observer. False if the handle is unknown.
    pub fn remove(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Notify a single observer, isolating its failures.
    pub fn notify_one(&mut self, id: SubscriberId, state: &TrackerState) {
        if let Some((_, observer)) = self.entries.iter_mut().find(|(entry_id, _)| *entry_id == id) {
            Self::call(id, observer.as_mut(), state);
        }
    }

    /// Notify every observer in registration order.
    pub fn notify_all(&mut self, state: &TrackerState) {
        for (id, observer) in &mut self.entries {
            Self::call(*id, observer.as_mut(), state);
        }
    }

    fn call(id: SubscriberId, observer: &mut dyn StateObserver, state: &TrackerState) {
        match panic::catch_unwind(AssertUnwindSafe(|| observer.on_change(state))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!("{id}: {err}"),
            Err(_) => warn!("{id} panicked during notification"),
        }
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
