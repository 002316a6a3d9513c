//! State ownership: snapshots, typed updates, atomic transactions and
//! change observers.
//!
//! ## Key Types
//!
//! - `StateStore`: owns the `TrackerState` and commits drafts atomically
//! - `StateUpdate`: closed set of field-level updates
//! - `StateObserver`: callback notified after every commit

mod observer;
mod state_store;
mod update;

pub use observer::{ObserverError, ObserverList, StateObserver, SubscriberId};
pub use state_store::StateStore;
pub use update::StateUpdate;
