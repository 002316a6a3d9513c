//! Agenda voting.
//!
//! - `Agenda` / `Ballot`: one vote-bearing decision and its ballots
//! - `VoteTally`: order-preserving per-option totals
//! - `AgendaBallotTracker`: the single open agenda and the archive

mod ballot;
mod tracker;

pub use ballot::{Agenda, Ballot, VoteTally};
pub use tracker::AgendaBallotTracker;
