//! The canonical state tree.
//!
//! ## TrackerState
//!
//! Everything a session knows:
//! - Roster (registration order) and the eight strategy cards
//! - Turn pointer and timer
//! - Phase, action-phase and agenda-phase bookkeeping
//! - VP audit history
//!
//! Uses `im` persistent data structures, so cloning is O(1) and a clone is
//! a fully independent value: mutating it never reaches back into the
//! state it was cloned from. Snapshots handed to callers are plain clones.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Initiative, StrategyCard};
use super::config::card_quota;
use super::ids::PlayerId;
use super::phase::{ActionPhaseState, AgendaPhaseState, GamePhase, TimerState};
use super::player::Player;
use crate::cards::STRATEGY_CARDS;
use crate::victory::VpChange;

/// Complete tracker state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    /// Players in registration order.
    pub players: Vector<Player>,

    /// The eight strategy cards, ascending by initiative.
    pub strategy_cards: Vector<StrategyCard>,

    /// Positional offset into the active-player ordering.
    pub current_player_index: usize,

    pub timer: TimerState,

    pub phase: GamePhase,

    pub action_phase: ActionPhaseState,

    pub agenda_phase: AgendaPhaseState,

    /// VP audit records, oldest first, capped by configuration.
    pub vp_history: Vector<VpChange>,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerState {
    /// Create the setup-phase state: empty roster, eight unowned cards.
    #[must_use]
    pub fn new() -> Self {
        let strategy_cards = STRATEGY_CARDS
            .iter()
            .map(|def| StrategyCard::new(def.initiative, def.name))
            .collect();

        Self {
            players: Vector::new(),
            strategy_cards,
            current_player_index: 0,
            timer: TimerState::default(),
            phase: GamePhase::default(),
            action_phase: ActionPhaseState::default(),
            agenda_phase: AgendaPhaseState::default(),
            vp_history: Vector::new(),
        }
    }

    /// Number of registered players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Card quota for the current roster size.
    #[must_use]
    pub fn quota(&self) -> usize {
        card_quota(self.players.len())
    }

    // === Players ===

    /// Roster position of a player.
    #[must_use]
    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player for mutation.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        let index = self.player_index(id)?;
        self.players.get_mut(index)
    }

    /// Iterate over player IDs in registration order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    /// The player holding the speaker token, if any.
    #[must_use]
    pub fn speaker(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_speaker)
    }

    // === Cards ===

    /// Look up a card by initiative.
    #[must_use]
    pub fn card(&self, initiative: Initiative) -> Option<&StrategyCard> {
        self.strategy_cards.iter().find(|c| c.initiative == initiative)
    }

    /// Look up a card for mutation.
    pub fn card_mut(&mut self, initiative: Initiative) -> Option<&mut StrategyCard> {
        let index = self
            .strategy_cards
            .iter()
            .position(|c| c.initiative == initiative)?;
        self.strategy_cards.get_mut(index)
    }

    // === Derived ===

    /// Roster non-empty and every player has passed.
    #[must_use]
    pub fn every_player_passed(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.has_passed)
    }

    /// Recompute `action_phase.all_passed` from the roster.
    pub(crate) fn refresh_all_passed(&mut self) {
        self.action_phase.all_passed = self.every_player_passed();
    }

    /// Check the card ownership invariants.
    ///
    /// Every owned card names a real player who lists it, every held card
    /// names its holder as owner and at most one player is speaker.
    #[must_use]
    pub fn ownership_consistent(&self) -> bool {
        let cards_ok = self.strategy_cards.iter().all(|card| match card.player {
            Some(owner) => self.player(owner).is_some_and(|p| p.holds(card.initiative)),
            None => true,
        });

        let players_ok = self.players.iter().all(|p| {
            p.strategy_cards
                .iter()
                .all(|i| self.card(*i).is_some_and(|c| c.player == Some(p.id)))
        });

        let speakers = self.players.iter().filter(|p| p.is_speaker).count();

        cards_ok && players_ok && speakers <= 1 && self.strategy_cards.len() == STRATEGY_CARDS.len()
    }

    /// Ownership invariants plus every held set within the current quota.
    ///
    /// Removing a player can lower the quota below what others already
    /// hold; such a state is ownership-consistent but not consistent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let quota = self.quota();
        self.ownership_consistent() && self.players.iter().all(|p| p.held_count() <= quota)
    }
}
