//! Round reset.

use log::debug;

use crate::core::{ActionPhaseState, TrackerState};

/// Start-of-round transition.
pub struct RoundReset;

impl RoundReset {
    /// Return the table to the strategy-selection starting point.
    ///
    /// Cards left unclaimed gain one trade good. Then every pass, activation,
    /// ownership and held set is cleared, the turn pointer returns to 0 and a
    /// new turn cycle begins. VP, speaker and roster are untouched.
    pub fn start_new_round(state: &mut TrackerState) {
        for card in state.strategy_cards.iter_mut() {
            if card.player.is_none() {
                card.trade_good_bonus = card.trade_good_bonus.saturating_add(1);
            }
            card.is_activated = false;
            card.player = None;
        }

        for player in state.players.iter_mut() {
            player.has_passed = false;
            player.strategy_cards.clear();
        }

        state.current_player_index = 0;
        state.action_phase = ActionPhaseState {
            all_passed: false,
            turn_count: state.action_phase.turn_count.saturating_add(1),
        };

        debug!("new round, turn cycle {}", state.action_phase.turn_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardAssignment;
    use crate::core::{FactionId, Initiative, Player, PlayerId};
    use crate::turns::PassTracker;

    fn p(i: u64) -> PlayerId {
        PlayerId::new(i)
    }

    fn mid_round_state() -> TrackerState {
        let mut state = TrackerState::new();
        for i in 1..=3 {
            state
                .players
                .push_back(Player::new(p(i), format!("P{i}"), FactionId::new(format!("f{i}"))));
        }
        CardAssignment::assign(&mut state, p(1), Initiative::new(1));
        CardAssignment::assign(&mut state, p(2), Initiative::new(2));
        CardAssignment::assign(&mut state, p(3), Initiative::new(3));
        CardAssignment::toggle_activation(&mut state, Initiative::new(2));
        state.card_mut(Initiative::new(8)).unwrap().trade_good_bonus = 2;
        PassTracker::mark_passed(&mut state, p(1));
        state.player_mut(p(2)).unwrap().is_speaker = true;
        state.player_mut(p(3)).unwrap().victory_points = 6;
        state.current_player_index = 2;
        state
    }

    #[test]
    fn test_start_new_round() {
        let mut state = mid_round_state();
        let before = state.clone();

        RoundReset::start_new_round(&mut state);

        assert!(state.players.iter().all(|p| !p.has_passed && p.held_count() == 0));
        assert!(state.strategy_cards.iter().all(|c| c.player.is_none() && !c.is_activated));
        assert_eq!(state.current_player_index, 0);
        assert_eq!(state.action_phase.turn_count, before.action_phase.turn_count + 1);
        assert!(!state.action_phase.all_passed);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_bonus_only_for_unclaimed_cards() {
        let mut state = mid_round_state();
        let before = state.clone();

        RoundReset::start_new_round(&mut state);

        for (old, new) in before.strategy_cards.iter().zip(state.strategy_cards.iter()) {
            if old.player.is_none() {
                assert_eq!(new.trade_good_bonus, old.trade_good_bonus + 1);
            } else {
                assert_eq!(new.trade_good_bonus, old.trade_good_bonus);
            }
        }
        assert_eq!(state.card(Initiative::new(8)).unwrap().trade_good_bonus, 3);
    }

    #[test]
    fn test_vp_speaker_roster_persist() {
        let mut state = mid_round_state();

        RoundReset::start_new_round(&mut state);

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.speaker().map(|p| p.id), Some(p(2)));
        assert_eq!(state.player(p(3)).unwrap().victory_points, 6);
    }

    #[test]
    fn test_consecutive_rounds_accumulate_bonus() {
        let mut state = TrackerState::new();
        RoundReset::start_new_round(&mut state);
        RoundReset::start_new_round(&mut state);

        assert!(state.strategy_cards.iter().all(|c| c.trade_good_bonus == 2));
        assert_eq!(state.action_phase.turn_count, 2);
    }

    #[test]
    fn test_counters_saturate() {
        let mut state = TrackerState::new();
        state.action_phase.turn_count = u32::MAX;
        state.card_mut(Initiative::new(5)).unwrap().trade_good_bonus = u32::MAX;

        RoundReset::start_new_round(&mut state);

        assert_eq!(state.action_phase.turn_count, u32::MAX);
        assert_eq!(state.card(Initiative::new(5)).unwrap().trade_good_bonus, u32::MAX);
    }
}
