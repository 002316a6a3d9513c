//! Pass tracking for the action phase.
//!
//! Passing removes a player from further turns this round. The aggregate
//! `all_passed` flag is recomputed after every pass change.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerId, TrackerState};

/// Counts for the action-phase status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPhaseSummary {
    pub passed_count: usize,
    pub total_players: usize,
    /// Players who have not passed.
    pub active_players: usize,
    pub all_passed: bool,
    pub turn_count: u32,
}

/// Pass-flag rules.
pub struct PassTracker;

impl PassTracker {
    /// Mark a player as passed. False for unknown players.
    pub fn mark_passed(state: &mut TrackerState, player: PlayerId) -> bool {
        Self::set_passed(state, player, true)
    }

    /// Undo a pass. False for unknown players.
    pub fn unpass(state: &mut TrackerState, player: PlayerId) -> bool {
        Self::set_passed(state, player, false)
    }

    fn set_passed(state: &mut TrackerState, player: PlayerId, passed: bool) -> bool {
        let Some(target) = state.player_mut(player) else {
            return false;
        };
        target.has_passed = passed;
        state.refresh_all_passed();
        debug!("{player} passed={passed}, all_passed={}", state.action_phase.all_passed);
        true
    }

    /// Clear every pass and start a new turn cycle.
    ///
    /// Card assignments are left alone.
    pub fn reset_all_passes(state: &mut TrackerState) {
        for player in state.players.iter_mut() {
            player.has_passed = false;
        }
        state.action_phase.all_passed = false;
        state.action_phase.turn_count = state.action_phase.turn_count.saturating_add(1);
    }

    /// Zero the turn counter.
    pub fn reset_turn_count(state: &mut TrackerState) {
        state.action_phase.turn_count = 0;
    }

    /// Has this player passed? False for unknown players.
    #[must_use]
    pub fn has_passed(state: &TrackerState, player: PlayerId) -> bool {
        state.player(player).is_some_and(|p| p.has_passed)
    }

    /// Players who have passed, in registration order.
    pub fn passed_players(state: &TrackerState) -> impl Iterator<Item = &Player> {
        state.players.iter().filter(|p| p.has_passed)
    }

    /// Players who have not passed, in registration order.
    pub fn unpassed_players(state: &TrackerState) -> impl Iterator<Item = &Player> {
        state.players.iter().filter(|p| !p.has_passed)
    }

    /// Current turn-cycle counter.
    #[must_use]
    pub fn turn_count(state: &TrackerState) -> u32 {
        state.action_phase.turn_count
    }

    /// Summary counts for display.
    #[must_use]
    pub fn summary(state: &TrackerState) -> ActionPhaseSummary {
        let passed_count = Self::passed_players(state).count();
        let total_players = state.player_count();

        ActionPhaseSummary {
            passed_count,
            total_players,
            active_players: total_players - passed_count,
            all_passed: state.action_phase.all_passed,
            turn_count: state.action_phase.turn_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FactionId;

    fn p(i: u64) -> PlayerId {
        PlayerId::new(i)
    }

    fn state_with(n: u64) -> TrackerState {
        let mut state = TrackerState::new();
        for i in 1..=n {
            state
                .players
                .push_back(Player::new(p(i), format!("P{i}"), FactionId::new(format!("f{i}"))));
        }
        state
    }

    #[test]
    fn test_mark_passed_updates_aggregate() {
        let mut state = state_with(2);

        assert!(PassTracker::mark_passed(&mut state, p(1)));
        assert!(!state.action_phase.all_passed);

        assert!(PassTracker::mark_passed(&mut state, p(2)));
        assert!(state.action_phase.all_passed);

        assert!(PassTracker::unpass(&mut state, p(1)));
        assert!(!state.action_phase.all_passed);
        assert!(!PassTracker::has_passed(&state, p(1)));
    }

    #[test]
    fn test_unknown_player() {
        let mut state = state_with(1);
        assert!(!PassTracker::mark_passed(&mut state, p(9)));
        assert!(!PassTracker::unpass(&mut state, p(9)));
        assert!(!PassTracker::has_passed(&state, p(9)));
    }

    #[test]
    fn test_empty_roster_never_all_passed() {
        let mut state = TrackerState::new();
        state.refresh_all_passed();
        assert!(!state.action_phase.all_passed);
    }

    #[test]
    fn test_reset_all_passes() {
        let mut state = state_with(3);
        for i in 1..=3 {
            PassTracker::mark_passed(&mut state, p(i));
        }
        state.players.get_mut(0).unwrap().strategy_cards.push(crate::core::Initiative::new(1));

        PassTracker::reset_all_passes(&mut state);

        assert_eq!(PassTracker::passed_players(&state).count(), 0);
        assert!(!state.action_phase.all_passed);
        assert_eq!(PassTracker::turn_count(&state), 1);
        assert_eq!(state.players[0].held_count(), 1);
    }

    #[test]
    fn test_reset_turn_count() {
        let mut state = state_with(1);
        PassTracker::reset_all_passes(&mut state);
        PassTracker::reset_all_passes(&mut state);
        assert_eq!(PassTracker::turn_count(&state), 2);

        PassTracker::reset_turn_count(&mut state);
        assert_eq!(PassTracker::turn_count(&state), 0);
    }

    #[test]
    fn test_summary() {
        let mut state = state_with(4);
        PassTracker::mark_passed(&mut state, p(2));
        PassTracker::mark_passed(&mut state, p(4));

        let summary = PassTracker::summary(&state);
        assert_eq!(summary.passed_count, 2);
        assert_eq!(summary.total_players, 4);
        assert_eq!(summary.active_players, 2);
        assert!(!summary.all_passed);

        let unpassed: Vec<_> = PassTracker::unpassed_players(&state).map(|p| p.id).collect();
        assert_eq!(unpassed, vec![p(1), p(3)]);
    }

    #[test]
    fn test_turn_count_saturates() {
        let mut state = state_with(1);
        state.action_phase.turn_count = u32::MAX;

        PassTracker::reset_all_passes(&mut state);
        assert_eq!(PassTracker::turn_count(&state), u32::MAX);
    }
}
