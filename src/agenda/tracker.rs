//! The open-agenda slot and the agenda archive.
//!
//! At most one agenda is open at a time. It lives in the tracker, outside
//! the state tree, until it is completed (archived into
//! `agenda_phase.agendas`) or cancelled (discarded).

use chrono::{DateTime, Utc};
use log::debug;

use crate::core::{AgendaId, PlayerId, TrackerState};

use super::ballot::{Agenda, Ballot, VoteTally};

/// Holds the single in-flight agenda.
#[derive(Clone, Debug, Default)]
pub struct AgendaBallotTracker {
    current: Option<Agenda>,
}

impl AgendaBallotTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new agenda, discarding any agenda already open.
    pub fn open(&mut self, id: AgendaId, name: &str, now: DateTime<Utc>) -> &Agenda {
        if let Some(previous) = &self.current {
            debug!("discarding open agenda {} ({})", previous.id, previous.name);
        }
        self.current.insert(Agenda::new(id, name, now))
    }

    /// The open agenda, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Agenda> {
        self.current.as_ref()
    }

    /// Record a player's vote on the open agenda.
    ///
    /// Replaces the player's earlier ballot. False when no agenda is open or
    /// the player is unknown.
    pub fn record_vote(
        &mut self,
        state: &TrackerState,
        player: PlayerId,
        vote_count: u32,
        voted_for: &str,
    ) -> bool {
        let Some(agenda) = self.current.as_mut() else {
            return false;
        };
        let Some(voter) = state.player(player) else {
            return false;
        };

        agenda.upsert_ballot(Ballot {
            player,
            player_name: voter.name.clone(),
            vote_count,
            voted_for: voted_for.trim().to_string(),
        });
        true
    }

    /// Record the resolved outcome of the open agenda.
    pub fn set_outcome(&mut self, outcome: &str) -> bool {
        match self.current.as_mut() {
            Some(agenda) => {
                agenda.outcome = Some(outcome.trim().to_string());
                true
            }
            None => false,
        }
    }

    /// Totals for the open agenda; empty when none is open.
    #[must_use]
    pub fn tally(&self) -> VoteTally {
        self.current.as_ref().map(Agenda::tally).unwrap_or_default()
    }

    /// Leading option of the open agenda.
    #[must_use]
    pub fn winning_option(&self) -> Option<String> {
        self.tally().winner().map(str::to_string)
    }

    /// Archive the open agenda.
    ///
    /// Requires a non-empty outcome. On failure nothing changes.
    pub fn complete(&mut self, state: &mut TrackerState) -> bool {
        if !self.current.as_ref().is_some_and(Agenda::has_outcome) {
            return false;
        }
        let Some(agenda) = self.current.take() else {
            return false;
        };

        debug!("archiving agenda {} ({})", agenda.id, agenda.name);
        state.agenda_phase.agendas.push_back(agenda);
        state.agenda_phase.current_agenda_index = state.agenda_phase.agendas.len() - 1;
        true
    }

    /// Discard the open agenda. False if none was open.
    pub fn cancel(&mut self) -> bool {
        self.current.take().is_some()
    }

    // === Archive ===

    /// Completed agendas, oldest first.
    pub fn history(state: &TrackerState) -> impl Iterator<Item = &Agenda> {
        state.agenda_phase.agendas.iter()
    }

    /// Look up an archived agenda.
    #[must_use]
    pub fn find(state: &TrackerState, id: AgendaId) -> Option<&Agenda> {
        state.agenda_phase.agendas.iter().find(|a| a.id == id)
    }

    /// Remove an archived agenda. False if not found.
    pub fn delete(state: &mut TrackerState, id: AgendaId) -> bool {
        let Some(pos) = state.agenda_phase.agendas.iter().position(|a| a.id == id) else {
            return false;
        };
        state.agenda_phase.agendas.remove(pos);
        state.agenda_phase.current_agenda_index =
            state.agenda_phase.agendas.len().saturating_sub(1);
        true
    }

    /// Drop the whole archive and any open agenda.
    pub fn clear_history(&mut self, state: &mut TrackerState) {
        state.agenda_phase.agendas.clear();
        state.agenda_phase.current_agenda_index = 0;
        self.current = None;
    }
}
