//! Typed partial updates accepted by [`StateStore::apply`](super::StateStore::apply).

use crate::core::{ActionPhaseState, AgendaPhaseState, GamePhase, TimerState, TrackerState};

/// One field-level replacement of the state tree.
///
/// Roster, card and VP edits go through the engines instead, so that the
/// ownership and clamping rules cannot be bypassed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateUpdate {
    Phase(GamePhase),
    CurrentPlayerIndex(usize),
    ActionPhase(ActionPhaseState),
    AgendaPhase(AgendaPhaseState),
    Timer(TimerState),
    /// Swap in an entire state, as a load does.
    Replace(Box<TrackerState>),
}

impl StateUpdate {
    /// Write this update into `state`.
    pub fn apply_to(self, state: &mut TrackerState) {
        match self {
            Self::Phase(phase) => state.phase = phase,
            Self::CurrentPlayerIndex(index) => state.current_player_index = index,
            Self::ActionPhase(action_phase) => state.action_phase = action_phase,
            Self::AgendaPhase(agenda_phase) => state.agenda_phase = agenda_phase,
            Self::Timer(timer) => state.timer = timer,
            Self::Replace(next) => *state = *next,
        }
    }

    /// Short label for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Phase(_) => "phase",
            Self::CurrentPlayerIndex(_) => "current_player_index",
            Self::ActionPhase(_) => "action_phase",
            Self::AgendaPhase(_) => "agenda_phase",
            Self::Timer(_) => "timer",
            Self::Replace(_) => "replace",
        }
    }
}
