//! Strategy card definitions - static card data.
//!
//! `CardDefinition` holds the printed properties of a strategy card.
//! Session data (owner, activation, trade-good bonus) lives in
//! `core::StrategyCard`.

use crate::core::Initiative;

/// Printed data for one strategy card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardDefinition {
    pub initiative: Initiative,
    pub name: &'static str,
    /// Display colour as a `#rrggbb` string.
    pub color: &'static str,
    /// Product the current printing comes from.
    pub version: &'static str,
    pub primary_ability: &'static str,
    pub secondary_ability: &'static str,
}

/// Fallback colour for unknown initiatives.
pub const DEFAULT_CARD_COLOR: &str = "#3a5270";

/// The eight strategy cards, ascending by initiative.
pub const STRATEGY_CARDS: [CardDefinition; 8] = [
    CardDefinition {
        initiative: Initiative(1),
        name: "Leadership",
        color: "#c41e3a",
        version: "base",
        primary_ability: "Gain 3 command tokens",
        secondary_ability: "Spend 1 influence to gain 1 command token",
    },
    CardDefinition {
        initiative: Initiative(2),
        name: "Diplomacy",
        color: "#ffa500",
        version: "codex-1",
        primary_ability: "Ready up to 2 exhausted planets you control",
        secondary_ability: "Spend 1 influence to ready an exhausted planet you control",
    },
    CardDefinition {
        initiative: Initiative(3),
        name: "Politics",
        color: "#9370db",
        version: "base",
        primary_ability: "Draw 2 action cards and become speaker",
        secondary_ability: "Spend 1 influence to draw 2 action cards",
    },
    CardDefinition {
        initiative: Initiative(4),
        name: "Construction",
        color: "#228b22",
        version: "thunders-edge",
        primary_ability: "Place 1 PDS or 1 space dock on a planet you control",
        secondary_ability: "Spend 1 influence to place 1 PDS on a planet you control",
    },
    CardDefinition {
        initiative: Initiative(5),
        name: "Trade",
        color: "#ffd700",
        version: "base",
        primary_ability: "Gain 3 trade goods and refresh commodities",
        secondary_ability: "Send commodities or resolve trade agreements",
    },
    CardDefinition {
        initiative: Initiative(6),
        name: "Warfare",
        color: "#dc143c",
        version: "thunders-edge",
        primary_ability: "Remove 1 command token from board, then produce units",
        secondary_ability: "Spend 1 influence to use PRODUCTION in 1 system",
    },
    CardDefinition {
        initiative: Initiative(7),
        name: "Technology",
        color: "#4682b4",
        version: "base",
        primary_ability: "Research 1 technology",
        secondary_ability: "Spend 1 influence and 4 resources to research 1 technology",
    },
    CardDefinition {
        initiative: Initiative(8),
        name: "Imperial",
        color: "#8b4513",
        version: "base",
        primary_ability: "Score 1 public objective or gain 1 victory point",
        secondary_ability: "Spend 1 influence to draw 1 secret objective",
    },
];

/// Look up a card definition by initiative.
#[must_use]
pub fn definition(initiative: Initiative) -> Option<&'static CardDefinition> {
    STRATEGY_CARDS.iter().find(|d| d.initiative == initiative)
}

/// Display colour for a card, falling back to the neutral colour.
#[must_use]
pub fn card_color(initiative: Initiative) -> &'static str {
    definition(initiative).map_or(DEFAULT_CARD_COLOR, |d| d.color)
}

/// Printing version for a card, `"unknown"` when not a real card.
#[must_use]
pub fn card_version(initiative: Initiative) -> &'static str {
    definition(initiative).map_or("unknown", |d| d.version)
}
