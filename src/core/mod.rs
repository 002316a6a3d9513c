//! Core tracker types: identifiers, players, cards, phases, state, configuration.
//!
//! Everything here is plain data. The engines in `cards`, `turns`, `agenda`
//! and `victory` operate on `TrackerState`; the `store` owns it.

pub mod ids;
pub mod player;
pub mod card;
pub mod phase;
pub mod config;
pub mod state;

pub use ids::{AgendaId, IdGenerator, PlayerId};
pub use player::{FactionId, HeldCards, Player};
pub use card::{Initiative, StrategyCard};
pub use phase::{ActionPhaseState, AgendaPhaseState, GamePhase, TimerState};
pub use config::{card_quota, TrackerConfig, NAALU_COLLECTIVE};
pub use state::TrackerState;
