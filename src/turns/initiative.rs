//! Initiative ordering and the current-turn pointer.
//!
//! A player's effective initiative is the lowest card they hold, except
//! that always-first factions act at initiative 0 while they hold any card.
//! Players without cards are unranked and sit out the ordering.
//!
//! The turn pointer (`current_player_index`) is a position in the active
//! ordering, not a player identity. When a pass removes a player ahead of
//! the pointer, the same position can resolve to a different player.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Player, TrackerConfig, TrackerState};

/// Position of a player in the initiative order.
///
/// `Ranked` values compare by initiative; `Unranked` sorts after every
/// ranked value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectiveInitiative {
    Ranked(u8),
    Unranked,
}

impl EffectiveInitiative {
    /// The ranked value, if any.
    #[must_use]
    pub fn value(self) -> Option<u8> {
        match self {
            EffectiveInitiative::Ranked(v) => Some(v),
            EffectiveInitiative::Unranked => None,
        }
    }

    #[must_use]
    pub fn is_ranked(self) -> bool {
        matches!(self, EffectiveInitiative::Ranked(_))
    }
}

impl std::fmt::Display for EffectiveInitiative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectiveInitiative::Ranked(v) => write!(f, "{v}"),
            EffectiveInitiative::Unranked => f.write_str("∞"),
        }
    }
}

/// Initiative ordering rules.
pub struct TurnOrder;

impl TurnOrder {
    /// Effective initiative of a player.
    ///
    /// The always-first override only applies to players holding at least
    /// one card; a card-less always-first player is unranked like anyone else.
    #[must_use]
    pub fn effective_initiative(config: &TrackerConfig, player: &Player) -> EffectiveInitiative {
        match player.lowest_card() {
            None => EffectiveInitiative::Unranked,
            Some(_) if config.is_always_first(&player.faction) => EffectiveInitiative::Ranked(0),
            Some(lowest) => EffectiveInitiative::Ranked(lowest.value()),
        }
    }

    /// Players still taking turns, in initiative order.
    ///
    /// Includes players holding a card who have not passed. Ties keep
    /// registration order.
    #[must_use]
    pub fn active_players<'a>(state: &'a TrackerState, config: &TrackerConfig) -> Vec<&'a Player> {
        let mut active: Vec<_> = state
            .players
            .iter()
            .filter(|p| p.held_count() > 0 && !p.has_passed)
            .collect();
        active.sort_by_key(|p| Self::effective_initiative(config, p));
        active
    }

    /// Every card holder in initiative order, passed or not.
    #[must_use]
    pub fn players_by_initiative<'a>(
        state: &'a TrackerState,
        config: &TrackerConfig,
    ) -> Vec<&'a Player> {
        let mut holders: Vec<_> = state.players.iter().filter(|p| p.held_count() > 0).collect();
        holders.sort_by_key(|p| Self::effective_initiative(config, p));
        holders
    }

    /// Whose turn it is. `None` when nobody is active.
    #[must_use]
    pub fn current_player<'a>(
        state: &'a TrackerState,
        config: &TrackerConfig,
    ) -> Option<&'a Player> {
        let active = Self::active_players(state, config);
        if active.is_empty() {
            return None;
        }
        Some(active[state.current_player_index % active.len()])
    }

    /// Move the pointer to the next active position.
    ///
    /// The ordering is recomputed first, so passes since the last call are
    /// taken into account. Returns false (pointer untouched) when nobody is
    /// active.
    pub fn advance(state: &mut TrackerState, config: &TrackerConfig) -> bool {
        let active_len = Self::active_players(state, config).len();
        if active_len == 0 {
            return false;
        }
        state.current_player_index = (state.current_player_index % active_len + 1) % active_len;
        debug!("turn pointer advanced to {}", state.current_player_index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardAssignment;
    use crate::core::{FactionId, Initiative, PlayerId, NAALU_COLLECTIVE};

    fn p(i: u64) -> PlayerId {
        PlayerId::new(i)
    }

    fn state_with(factions: &[&str]) -> TrackerState {
        let mut state = TrackerState::new();
        for (i, faction) in factions.iter().enumerate() {
            let id = i as u64 + 1;
            state
                .players
                .push_back(Player::new(p(id), format!("P{id}"), FactionId::from(*faction)));
        }
        state
    }

    fn give(state: &mut TrackerState, player: u64, cards: &[u8]) {
        for c in cards {
            assert!(CardAssignment::assign(state, p(player), Initiative::new(*c)));
        }
    }

    #[test]
    fn test_effective_initiative_lowest_card() {
        let config = TrackerConfig::default();
        let mut state = state_with(&["arborec", "winnu", "nomad"]);
        give(&mut state, 1, &[7, 3]);

        let player = state.player(p(1)).unwrap();
        assert_eq!(
            TurnOrder::effective_initiative(&config, player),
            EffectiveInitiative::Ranked(3)
        );
    }

    #[test]
    fn test_effective_initiative_always_first() {
        let config = TrackerConfig::default();
        let mut state = state_with(&[NAALU_COLLECTIVE, "winnu", "nomad"]);
        give(&mut state, 1, &[3, 7]);

        let player = state.player(p(1)).unwrap();
        assert_eq!(
            TurnOrder::effective_initiative(&config, player),
            EffectiveInitiative::Ranked(0)
        );
    }

    #[test]
    fn test_always_first_without_cards_is_unranked() {
        let config = TrackerConfig::default();
        let state = state_with(&[NAALU_COLLECTIVE]);

        let player = state.player(p(1)).unwrap();
        assert_eq!(TurnOrder::effective_initiative(&config, player), EffectiveInitiative::Unranked);
    }

    #[test]
    fn test_unranked_sorts_last() {
        assert!(EffectiveInitiative::Ranked(0) < EffectiveInitiative::Ranked(8));
        assert!(EffectiveInitiative::Ranked(8) < EffectiveInitiative::Unranked);
        assert_eq!(EffectiveInitiative::Unranked.value(), None);
        assert_eq!(EffectiveInitiative::Unranked.to_string(), "∞");
    }

    #[test]
    fn test_active_players_order_and_pass() {
        let config = TrackerConfig::default();
        let mut state = state_with(&["arborec", "winnu", "nomad"]);
        give(&mut state, 1, &[1]);
        give(&mut state, 2, &[2, 4]);

        let ids: Vec<_> = TurnOrder::active_players(&state, &config).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p(1), p(2)]);
        assert_eq!(TurnOrder::current_player(&state, &config).map(|p| p.id), Some(p(1)));

        state.player_mut(p(1)).unwrap().has_passed = true;

        let ids: Vec<_> = TurnOrder::active_players(&state, &config).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p(2)]);
        assert_eq!(state.current_player_index, 0);
        assert_eq!(TurnOrder::current_player(&state, &config).map(|p| p.id), Some(p(2)));
    }

    #[test]
    fn test_always_first_leads_order() {
        let config = TrackerConfig::default();
        let mut state = state_with(&["arborec", NAALU_COLLECTIVE, "nomad"]);
        give(&mut state, 1, &[1]);
        give(&mut state, 2, &[8]);
        give(&mut state, 3, &[5]);

        let ids: Vec<_> = TurnOrder::active_players(&state, &config).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p(2), p(1), p(3)]);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let config = TrackerConfig::new().with_always_first("winnu");
        let mut state = state_with(&["winnu", "arborec", NAALU_COLLECTIVE]);
        give(&mut state, 1, &[6]);
        give(&mut state, 2, &[1]);
        give(&mut state, 3, &[4]);

        let ids: Vec<_> = TurnOrder::active_players(&state, &config).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p(1), p(3), p(2)]);
    }

    #[test]
    fn test_current_player_wraps_index() {
        let config = TrackerConfig::default();
        let mut state = state_with(&["a", "b"]);
        give(&mut state, 1, &[1]);
        give(&mut state, 2, &[2]);
        state.current_player_index = 5;

        assert_eq!(TurnOrder::current_player(&state, &config).map(|p| p.id), Some(p(2)));
    }

    #[test]
    fn test_advance_cycles() {
        let config = TrackerConfig::default();
        let mut state = state_with(&["a", "b", "c"]);
        give(&mut state, 1, &[3]);
        give(&mut state, 2, &[1]);
        give(&mut state, 3, &[2]);

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(TurnOrder::current_player(&state, &config).unwrap().id);
            assert!(TurnOrder::advance(&mut state, &config));
        }
        assert_eq!(seen, vec![p(2), p(3), p(1), p(2)]);
    }

    #[test]
    fn test_advance_uses_fresh_active_size() {
        let config = TrackerConfig::default();
        let mut state = state_with(&["a", "b", "c"]);
        give(&mut state, 1, &[1]);
        give(&mut state, 2, &[2]);
        give(&mut state, 3, &[3]);
        state.current_player_index = 1;

        state.player_mut(p(3)).unwrap().has_passed = true;
        assert!(TurnOrder::advance(&mut state, &config));
        assert_eq!(state.current_player_index, 0);
    }

    #[test]
    fn test_advance_with_nobody_active() {
        let config = TrackerConfig::default();
        let mut state = state_with(&["a", "b"]);
        state.current_player_index = 3;

        assert!(!TurnOrder::advance(&mut state, &config));
        assert_eq!(state.current_player_index, 3);
        assert!(TurnOrder::current_player(&state, &config).is_none());
    }

    #[test]
    fn test_players_by_initiative_includes_passed() {
        let config = TrackerConfig::default();
        let mut state = state_with(&["a", "b", "c"]);
        give(&mut state, 1, &[4]);
        give(&mut state, 2, &[2]);
        state.player_mut(p(2)).unwrap().has_passed = true;

        let ids: Vec<_> = TurnOrder::players_by_initiative(&state, &config)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![p(2), p(1)]);
    }

    #[test]
    fn test_advance_from_huge_index() {
        let config = TrackerConfig::default();
        let mut state = state_with(&["a", "b"]);
        give(&mut state, 1, &[1]);
        state.current_player_index = usize::MAX;

        assert!(TurnOrder::advance(&mut state, &config));
        assert_eq!(state.current_player_index, 0);

        give(&mut state, 2, &[2]);
        state.current_player_index = usize::MAX;
        assert!(TurnOrder::advance(&mut state, &config));
        assert_eq!(state.current_player_index, (usize::MAX % 2 + 1) % 2);
    }
}
