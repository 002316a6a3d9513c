//! Strategy cards: printed definitions and the assignment engine.
//!
//! ## Key Types
//!
//! - `CardDefinition`: Printed card data (name, colour, abilities)
//! - `CardAssignment`: Assignment, unassignment, activation and validation
//! - `AssignmentReport`: Per-player result of the exact-quota check
//!
//! ## Quota
//!
//! Players hold `card_quota(player_count)` cards: two in three- and
//! four-player games, one otherwise.

pub mod definition;
pub mod assignment;

pub use definition::{
    card_color, card_version, definition, CardDefinition, DEFAULT_CARD_COLOR, STRATEGY_CARDS,
};
pub use assignment::{AssignmentError, AssignmentReport, CardAssignment, InvalidAssignment};
