//! Player records.
//!
//! ## Player
//!
//! A registered seat at the table. The roster order (registration order)
//! is significant: it breaks initiative ties.
//!
//! ## FactionId
//!
//! Faction slug such as `"naalu-collective"`. Unique among players.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Initiative;
use super::ids::PlayerId;

/// Strategy cards held by one player.
///
/// At most two cards are ever held (the 3-4 player quota), so the set
/// stays inline.
pub type HeldCards = SmallVec<[Initiative; 2]>;

/// Faction identifier (slug).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactionId(pub String);

impl FactionId {
    /// Create a faction ID.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Borrow the slug.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FactionId {
    fn from(slug: &str) -> Self {
        Self(slug.to_string())
    }
}

impl std::fmt::Display for FactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Display name, 1-30 characters after trimming.
    pub name: String,

    pub faction: FactionId,

    /// Initiatives of the strategy cards this player holds, in the order
    /// they were assigned.
    pub strategy_cards: HeldCards,

    pub is_speaker: bool,

    /// Accumulated turn time across the session.
    pub turn_time_seconds: u64,

    pub has_passed: bool,

    /// Always within `0..=TrackerConfig::max_vp`.
    pub victory_points: u32,
}

impl Player {
    /// Create a fresh player with no cards and zero VP.
    pub fn new(id: PlayerId, name: impl Into<String>, faction: FactionId) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            strategy_cards: SmallVec::new(),
            is_speaker: false,
            turn_time_seconds: 0,
            has_passed: false,
            victory_points: 0,
        }
    }

    /// Number of strategy cards held.
    #[must_use]
    pub fn held_count(&self) -> usize {
        self.strategy_cards.len()
    }

    /// Does this player hold the given card?
    #[must_use]
    pub fn holds(&self, initiative: Initiative) -> bool {
        self.strategy_cards.contains(&initiative)
    }

    /// Lowest held initiative, ignoring faction rules.
    #[must_use]
    pub fn lowest_card(&self) -> Option<Initiative> {
        self.strategy_cards.iter().copied().min()
    }

    pub(crate) fn release_card(&mut self, initiative: Initiative) -> bool {
        let before = self.strategy_cards.len();
        self.strategy_cards.retain(|held| *held != initiative);
        self.strategy_cards.len() != before
    }
}
