//! The single owner of the tracker state.
//!
//! ## Commit model
//!
//! Every mutation runs against a draft clone of the state (O(1) with `im`).
//! If the closure leaves the draft equal to the committed state nothing
//! happens; otherwise the draft replaces the committed state in one step and
//! observers are notified once. A closure that bails out half-way through a
//! [`StateStore::try_transact`] leaves the committed state untouched.

use log::debug;

use crate::core::TrackerState;

use super::observer::{ObserverList, StateObserver, SubscriberId};
use super::update::StateUpdate;

/// Authoritative state plus its observers.
#[derive(Debug, Default)]
pub struct StateStore {
    state: TrackerState,
    observers: ObserverList,
    revision: u64,
}

impl StateStore {
    /// Store holding the empty setup state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store starting from an existing state.
    #[must_use]
    pub fn with_state(state: TrackerState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Borrow the committed state.
    #[must_use]
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Independent copy of the committed state.
    #[must_use]
    pub fn snapshot(&self) -> TrackerState {
        self.state.clone()
    }

    /// Number of commits so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply a typed update. Returns whether anything changed.
    pub fn apply(&mut self, update: StateUpdate) -> bool {
        let kind = update.kind();
        let changed = self.transact(|draft| {
            let before = draft.clone();
            update.apply_to(draft);
            *draft != before
        });
        if changed {
            debug!("applied {kind} update");
        }
        changed
    }

    /// Run `f` against a draft and commit it if it differs.
    pub fn transact<R>(&mut self, f: impl FnOnce(&mut TrackerState) -> R) -> R {
        let mut draft = self.state.clone();
        let result = f(&mut draft);
        self.commit(draft);
        result
    }

    /// Like [`transact`](Self::transact), but an `Err` discards the draft.
    pub fn try_transact<R, E>(
        &mut self,
        f: impl FnOnce(&mut TrackerState) -> Result<R, E>,
    ) -> Result<R, E> {
        let mut draft = self.state.clone();
        let result = f(&mut draft)?;
        self.commit(draft);
        Ok(result)
    }

    fn commit(&mut self, draft: TrackerState) {
        if draft == self.state {
            return;
        }
        self.state = draft;
        self.revision += 1;
        self.observers.notify_all(&self.state);
    }

    /// Register an observer. It is called once right away with the current
    /// state, then after every commit.
    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) -> SubscriberId {
        let id = self.observers.add(Box::new(observer));
        self.observers.notify_one(id, &self.state);
        id
    }

    /// Stop notifying an observer. False if the handle is unknown.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.remove(id)
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Return to the empty setup state.
    pub fn reset(&mut self) {
        self.commit(TrackerState::new());
    }
}
