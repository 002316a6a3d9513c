//! Agendas, ballots and vote tallies.
//!
//! ## Tie-break
//!
//! `VoteTally` keeps options in the order they first appear in the ballot
//! list. The winner is the option with the highest total; among equal
//! totals the earliest-seen option wins. Insertion order is stored
//! explicitly (a `Vec` of entries plus an index map), never derived from
//! hash iteration.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{AgendaId, PlayerId};

/// One player's vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub player: PlayerId,
    /// Name at the time of voting.
    pub player_name: String,
    pub vote_count: u32,
    /// Chosen option, trimmed. Compared case-sensitively.
    pub voted_for: String,
}

/// An agenda put to vote.
///
/// Mutable only while open; archived agendas are never modified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    pub id: AgendaId,
    pub name: String,
    /// Ballots in the order they were (last) cast.
    pub votes: Vec<Ballot>,
    pub outcome: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Agenda {
    /// Name used when an agenda is opened without one.
    pub const DEFAULT_NAME: &'static str = "Agenda";

    /// Create an open agenda with no votes.
    ///
    /// A blank name falls back to [`Agenda::DEFAULT_NAME`].
    pub fn new(id: AgendaId, name: &str, created_at: DateTime<Utc>) -> Self {
        let name = name.trim();
        Self {
            id,
            name: if name.is_empty() { Self::DEFAULT_NAME.to_string() } else { name.to_string() },
            votes: Vec::new(),
            outcome: None,
            created_at,
        }
    }

    /// Cast or replace a player's ballot.
    ///
    /// A previous ballot from the same player is removed and the new one
    /// appended, so re-voting moves the player to the end of the list.
    pub fn upsert_ballot(&mut self, ballot: Ballot) {
        self.votes.retain(|b| b.player != ballot.player);
        self.votes.push(ballot);
    }

    /// Group the ballots by option.
    #[must_use]
    pub fn tally(&self) -> VoteTally {
        VoteTally::from_ballots(&self.votes)
    }

    /// Sum of every ballot's vote count.
    #[must_use]
    pub fn total_votes(&self) -> u64 {
        self.votes.iter().map(|b| u64::from(b.vote_count)).sum()
    }

    /// Has a non-empty outcome been recorded?
    #[must_use]
    pub fn has_outcome(&self) -> bool {
        self.outcome.as_deref().is_some_and(|o| !o.is_empty())
    }
}

/// Vote totals per option, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoteTally {
    entries: Vec<(String, u64)>,
    index: FxHashMap<String, usize>,
}

impl VoteTally {
    /// Fold ballots into per-option totals.
    #[must_use]
    pub fn from_ballots(ballots: &[Ballot]) -> Self {
        let mut tally = Self::default();
        for ballot in ballots {
            tally.add(&ballot.voted_for, u64::from(ballot.vote_count));
        }
        tally
    }

    fn add(&mut self, option: &str, votes: u64) {
        match self.index.get(option) {
            Some(&i) => self.entries[i].1 += votes,
            None => {
                self.index.insert(option.to_string(), self.entries.len());
                self.entries.push((option.to_string(), votes));
            }
        }
    }

    /// Total for one option.
    #[must_use]
    pub fn get(&self, option: &str) -> Option<u64> {
        self.index.get(option).map(|&i| self.entries[i].1)
    }

    /// (option, total) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(o, v)| (o.as_str(), *v))
    }

    /// Number of distinct options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Winning option; ties go to the earliest-seen option.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        let mut best: Option<&(String, u64)> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(o, _)| o.as_str())
    }
}
