//! Strategy card assignment.
//!
//! `CardAssignment` applies the card-taking rules to a `TrackerState`:
//! - Each player may hold up to `card_quota(player_count)` cards
//! - Taking a card another player holds revokes it from them first
//! - Taking a card resets its trade-good bonus
//!
//! Every operation keeps card ownership and held sets in agreement.

use log::debug;
use thiserror::Error;

use crate::core::{Initiative, Player, PlayerId, StrategyCard, TrackerState};

/// Why a card cannot be given to a player.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("no strategy card with initiative {0}")]
    CardNotFound(Initiative),

    #[error("{player} already holds {quota} strategy card(s)")]
    QuotaReached { player: PlayerId, quota: usize },
}

/// A player whose held-card count does not match the quota.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidAssignment {
    pub player: PlayerId,
    pub name: String,
    pub current: usize,
    pub required: usize,
}

/// Result of checking every player's card count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentReport {
    /// True iff `invalid` is empty.
    pub valid: bool,
    /// Cards each player must hold.
    pub required: usize,
    /// Players in registration order whose count differs from `required`.
    pub invalid: Vec<InvalidAssignment>,
}

/// Card assignment rules.
pub struct CardAssignment;

impl CardAssignment {
    /// Check whether `player` may take the card at `initiative`.
    ///
    /// A card the player already owns is always acceptable.
    pub fn validate_assignment(
        state: &TrackerState,
        player: PlayerId,
        initiative: Initiative,
    ) -> Result<(), AssignmentError> {
        let holder = state
            .player(player)
            .ok_or(AssignmentError::PlayerNotFound(player))?;
        let card = state
            .card(initiative)
            .ok_or(AssignmentError::CardNotFound(initiative))?;

        if card.player == Some(player) {
            return Ok(());
        }

        let quota = state.quota();
        if holder.held_count() >= quota {
            return Err(AssignmentError::QuotaReached { player, quota });
        }

        Ok(())
    }

    /// Give the card at `initiative` to `player`.
    ///
    /// Returns false (and changes nothing) when the player or card is
    /// unknown or the player is at quota. Re-assigning a card the player
    /// already owns succeeds without changes.
    pub fn assign(state: &mut TrackerState, player: PlayerId, initiative: Initiative) -> bool {
        if let Err(err) = Self::validate_assignment(state, player, initiative) {
            debug!("assign rejected: {err}");
            return false;
        }

        let previous = state.card(initiative).and_then(|c| c.player);
        if previous == Some(player) {
            return true;
        }

        if let Some(previous) = previous {
            if let Some(prev) = state.player_mut(previous) {
                prev.release_card(initiative);
            }
            debug!("card {initiative} revoked from {previous}");
        }

        if let Some(card) = state.card_mut(initiative) {
            card.player = Some(player);
            card.trade_good_bonus = 0;
        }
        if let Some(holder) = state.player_mut(player) {
            if !holder.holds(initiative) {
                holder.strategy_cards.push(initiative);
            }
        }

        debug!("card {initiative} assigned to {player}");
        true
    }

    /// Return the card at `initiative` to the pool.
    ///
    /// Returns false when the card is unknown or already unassigned.
    pub fn unassign(state: &mut TrackerState, initiative: Initiative) -> bool {
        let Some(owner) = state.card(initiative).and_then(|c| c.player) else {
            return false;
        };

        if let Some(holder) = state.player_mut(owner) {
            holder.release_card(initiative);
        }
        if let Some(card) = state.card_mut(initiative) {
            card.player = None;
        }

        debug!("card {initiative} unassigned from {owner}");
        true
    }

    /// Clear ownership of every card held by `player`.
    ///
    /// Used when a player leaves the roster.
    pub fn release_player(state: &mut TrackerState, player: PlayerId) {
        for card in state.strategy_cards.iter_mut() {
            if card.player == Some(player) {
                card.player = None;
            }
        }
        if let Some(holder) = state.player_mut(player) {
            holder.strategy_cards.clear();
        }
    }

    /// Check that every player holds exactly the quota.
    ///
    /// Holding fewer *or more* cards than required is reported.
    #[must_use]
    pub fn validate_all_assigned(state: &TrackerState) -> AssignmentReport {
        let required = state.quota();

        let invalid: Vec<_> = state
            .players
            .iter()
            .filter(|p| p.held_count() != required)
            .map(|p| InvalidAssignment {
                player: p.id,
                name: p.name.clone(),
                current: p.held_count(),
                required,
            })
            .collect();

        AssignmentReport {
            valid: invalid.is_empty(),
            required,
            invalid,
        }
    }

    // === Activation ===

    /// Flip the activation flag of a card. False for unknown cards.
    pub fn toggle_activation(state: &mut TrackerState, initiative: Initiative) -> bool {
        match state.card_mut(initiative) {
            Some(card) => {
                card.is_activated = !card.is_activated;
                true
            }
            None => false,
        }
    }

    /// Clear the activation flag of a card if it is set.
    pub fn deactivate(state: &mut TrackerState, initiative: Initiative) -> bool {
        match state.card_mut(initiative) {
            Some(card) if card.is_activated => {
                card.is_activated = false;
                true
            }
            _ => false,
        }
    }

    /// Clear every activation flag. Returns true if any flag was set.
    pub fn reset_all_activations(state: &mut TrackerState) -> bool {
        let mut changed = false;
        for card in state.strategy_cards.iter_mut() {
            changed |= card.is_activated;
            card.is_activated = false;
        }
        changed
    }

    /// Every assigned card has been activated.
    ///
    /// False when no card is assigned.
    #[must_use]
    pub fn all_activated(state: &TrackerState) -> bool {
        let mut assigned = Self::assigned(state).peekable();
        assigned.peek().is_some() && assigned.all(|c| c.is_activated)
    }

    // === Queries ===

    /// The player holding the card at `initiative`.
    #[must_use]
    pub fn owner_of(state: &TrackerState, initiative: Initiative) -> Option<&Player> {
        let owner = state.card(initiative)?.player?;
        state.player(owner)
    }

    /// Cards nobody holds.
    pub fn unassigned(state: &TrackerState) -> impl Iterator<Item = &StrategyCard> {
        state.strategy_cards.iter().filter(|c| c.player.is_none())
    }

    /// Cards somebody holds.
    pub fn assigned(state: &TrackerState) -> impl Iterator<Item = &StrategyCard> {
        state.strategy_cards.iter().filter(|c| c.player.is_some())
    }
}
