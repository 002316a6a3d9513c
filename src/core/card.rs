//! Strategy card state.
//!
//! Eight cards exist for the whole session, one per initiative value.
//! Only ownership, activation and the trade-good bonus ever change.

use serde::{Deserialize, Serialize};

use super::ids::PlayerId;

/// Initiative value printed on a strategy card (1-8).
///
/// Lower initiative acts earlier in the action phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Initiative(pub u8);

impl Initiative {
    /// Lowest printed initiative.
    pub const MIN: u8 = 1;
    /// Highest printed initiative.
    pub const MAX: u8 = 8;

    /// Create an initiative value. Out-of-range values are representable
    /// but never match a card.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Is this one of the printed initiatives?
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::MIN && self.0 <= Self::MAX
    }

    /// All eight printed initiatives in ascending order.
    pub fn all() -> impl Iterator<Item = Initiative> {
        (Self::MIN..=Self::MAX).map(Initiative)
    }
}

impl std::fmt::Display for Initiative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session state for one strategy card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyCard {
    pub initiative: Initiative,

    pub name: String,

    /// Owning player. When set, that player's held set lists this card.
    pub player: Option<PlayerId>,

    pub is_activated: bool,

    /// Trade goods accumulated by sitting unclaimed across rounds.
    pub trade_good_bonus: u32,
}

impl StrategyCard {
    /// Create an unowned, inactive card.
    pub fn new(initiative: Initiative, name: impl Into<String>) -> Self {
        Self {
            initiative,
            name: name.into(),
            player: None,
            is_activated: false,
            trade_good_bonus: 0,
        }
    }

    /// Is the card currently owned?
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.player.is_some()
    }
}
