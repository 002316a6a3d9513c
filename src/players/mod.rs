//! Player registration, roster edits and the faction catalog.

pub mod factions;
mod roster;

pub use factions::{factions_in, find_faction, Expansion, Faction, FACTIONS};
pub use roster::{RegistrationError, RegistrationIssue, Roster};
