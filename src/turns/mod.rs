//! Action-phase turn management.
//!
//! - `TurnOrder`: effective initiative, active ordering, turn pointer
//! - `PassTracker`: pass flags and the `all_passed` aggregate
//! - `RoundReset`: the start-of-round transition
//! - `TurnTimer`: per-player turn time accounting

mod initiative;
mod pass;
mod round;
mod timer;

pub use initiative::{EffectiveInitiative, TurnOrder};
pub use pass::{ActionPhaseSummary, PassTracker};
pub use round::RoundReset;
pub use timer::{format_time, TurnTimer};
