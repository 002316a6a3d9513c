//! # round-tracker
//!
//! Rules and state engine for a companion tracker of a multiplayer strategy
//! board game session.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: All game state lives in a single `TrackerState` held by
//!    the `StateStore`. Engines are stateless functions over it.
//!
//! 2. **Atomic Operations**: Every operation runs against a draft and is
//!    committed whole, so observers never see a half-applied change.
//!
//! 3. **Injected Time**: Operations that depend on the clock take `now`
//!    explicitly; `Session` offers `Utc::now()` wrappers.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshots via `im-rs`. A snapshot
//!   is an independent value; mutating it never touches the store.
//!
//! - **Total Mutations**: Mutations return `bool`/`Option` instead of
//!   failing. Registration and assignment validation report structured
//!   detail.
//!
//! ## Modules
//!
//! - `core`: Identifiers, players, strategy cards, phases, configuration, state
//! - `cards`: Card catalog, assignment and activation
//! - `players`: Registration, roster edits, faction catalog
//! - `turns`: Initiative ordering, passing, round reset, turn timer
//! - `agenda`: Agenda ballots, tallies and the agenda archive
//! - `victory`: Victory point ledger and win detection
//! - `store`: State ownership, typed updates, observers
//! - `session`: The per-game facade and its command surface
//! - `persist`: Save documents and storage backends

pub mod core;
pub mod cards;
pub mod players;
pub mod turns;
pub mod agenda;
pub mod victory;
pub mod store;
pub mod session;
pub mod persist;

// Re-export commonly used types
pub use crate::core::{
    AgendaId, PlayerId, IdGenerator,
    FactionId, Player, Initiative, StrategyCard,
    GamePhase, ActionPhaseState, AgendaPhaseState, TimerState,
    TrackerConfig, TrackerState, card_quota,
};

pub use crate::cards::{
    AssignmentError, AssignmentReport, InvalidAssignment,
    CardAssignment, CardDefinition,
};

pub use crate::players::{Faction, RegistrationError, RegistrationIssue, Roster};

pub use crate::turns::{
    EffectiveInitiative, TurnOrder,
    ActionPhaseSummary, PassTracker,
    RoundReset, TurnTimer,
};

pub use crate::agenda::{Agenda, AgendaBallotTracker, Ballot, VoteTally};

pub use crate::victory::{Leader, Standing, VictoryLedger, VpChange, VpSummary, WinCheck};

pub use crate::store::{ObserverError, StateObserver, StateStore, StateUpdate, SubscriberId};

pub use crate::session::{Command, CommandOutcome, Session};

pub use crate::persist::{
    StateDocument, PersistenceError,
    Storage, FileStorage, MemoryStorage, STORAGE_KEY,
};

// Python bindings (optional)
#[cfg(feature = "python")]
pub mod python;
