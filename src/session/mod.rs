//! The session facade: one tracked game and its command surface.
//!
//! ## Key Types
//!
//! - `Session`: owns the store, id generator and open agenda slot
//! - `Command` / `CommandOutcome`: the same operations as plain data

mod command;
mod game;

pub use command::{Command, CommandOutcome};
pub use game::Session;
