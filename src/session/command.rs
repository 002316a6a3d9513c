//! Serializable commands.
//!
//! Every mutating session operation has a `Command` variant, so a front end
//! can drive the tracker with plain data (for example JSON messages) and
//! get a uniform [`CommandOutcome`] back.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::{AgendaId, GamePhase, Initiative, PlayerId};
use crate::players::RegistrationError;

use super::game::Session;

/// A tracker mutation as data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // Roster
    AddPlayer { name: String, faction: String },
    RemovePlayer { player: PlayerId },
    RenamePlayer { player: PlayerId, name: String },
    ChangeFaction { player: PlayerId, faction: String },
    SetSpeaker { player: PlayerId },
    SetPhase { phase: GamePhase },

    // Strategy cards
    AssignCard { player: PlayerId, initiative: Initiative },
    UnassignCard { initiative: Initiative },
    ToggleActivation { initiative: Initiative },
    DeactivateCard { initiative: Initiative },
    ResetActivations,

    // Turns
    AdvanceTurn,
    MarkPassed { player: PlayerId },
    Unpass { player: PlayerId },
    ResetAllPasses,
    ResetTurnCount,
    StartNewRound,
    StartTimer,
    PauseTimer,
    ResetTimer,

    // Agenda
    OpenAgenda { name: String },
    RecordVote { player: PlayerId, vote_count: u32, voted_for: String },
    SetOutcome { outcome: String },
    CompleteAgenda,
    CancelAgenda,
    DeleteAgenda { agenda: AgendaId },
    ClearAgendaHistory,

    // Victory points
    IncrementVp { player: PlayerId, amount: u32 },
    DecrementVp { player: PlayerId, amount: u32 },
    SetVp { player: PlayerId, points: i64 },
    ResetAllVps,
    ClearVpHistory,

    ResetGame,
}

impl Command {
    /// Short label for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddPlayer { .. } => "add_player",
            Self::RemovePlayer { .. } => "remove_player",
            Self::RenamePlayer { .. } => "rename_player",
            Self::ChangeFaction { .. } => "change_faction",
            Self::SetSpeaker { .. } => "set_speaker",
            Self::SetPhase { .. } => "set_phase",
            Self::AssignCard { .. } => "assign_card",
            Self::UnassignCard { .. } => "unassign_card",
            Self::ToggleActivation { .. } => "toggle_activation",
            Self::DeactivateCard { .. } => "deactivate_card",
            Self::ResetActivations => "reset_activations",
            Self::AdvanceTurn => "advance_turn",
            Self::MarkPassed { .. } => "mark_passed",
            Self::Unpass { .. } => "unpass",
            Self::ResetAllPasses => "reset_all_passes",
            Self::ResetTurnCount => "reset_turn_count",
            Self::StartNewRound => "start_new_round",
            Self::StartTimer => "start_timer",
            Self::PauseTimer => "pause_timer",
            Self::ResetTimer => "reset_timer",
            Self::OpenAgenda { .. } => "open_agenda",
            Self::RecordVote { .. } => "record_vote",
            Self::SetOutcome { .. } => "set_outcome",
            Self::CompleteAgenda => "complete_agenda",
            Self::CancelAgenda => "cancel_agenda",
            Self::DeleteAgenda { .. } => "delete_agenda",
            Self::ClearAgendaHistory => "clear_agenda_history",
            Self::IncrementVp { .. } => "increment_vp",
            Self::DecrementVp { .. } => "decrement_vp",
            Self::SetVp { .. } => "set_vp",
            Self::ResetAllVps => "reset_all_vps",
            Self::ClearVpHistory => "clear_vp_history",
            Self::ResetGame => "reset_game",
        }
    }

    /// The player this command targets, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Self::RemovePlayer { player }
            | Self::RenamePlayer { player, .. }
            | Self::ChangeFaction { player, .. }
            | Self::SetSpeaker { player }
            | Self::AssignCard { player, .. }
            | Self::MarkPassed { player }
            | Self::Unpass { player }
            | Self::RecordVote { player, .. }
            | Self::IncrementVp { player, .. }
            | Self::DecrementVp { player, .. }
            | Self::SetVp { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// Result of executing a [`Command`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The operation ran; `true` if it was accepted.
    Done(bool),
    PlayerAdded(PlayerId),
    AgendaOpened(AgendaId),
    Rejected(RegistrationError),
}

impl CommandOutcome {
    /// Did the command take effect (or succeed as a no-op)?
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Done(ok) => *ok,
            Self::PlayerAdded(_) | Self::AgendaOpened(_) => true,
            Self::Rejected(_) => false,
        }
    }
}

impl Session {
    /// Execute a command against the wall clock.
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        self.execute_at(command, Utc::now())
    }

    /// Execute a command with an explicit clock reading.
    pub fn execute_at(&mut self, command: Command, now: DateTime<Utc>) -> CommandOutcome {
        let name = command.name();
        if let Some(player) = command.player() {
            if self.player(player).is_none() {
                warn!("{name} targets unknown {player}");
            }
        }

        let outcome = self.dispatch(command, now);
        if !outcome.is_success() {
            debug!("{name} rejected");
        }
        outcome
    }

    fn dispatch(&mut self, command: Command, now: DateTime<Utc>) -> CommandOutcome {
        use CommandOutcome::Done;

        match command {
            Command::AddPlayer { name, faction } => match self.add_player(&name, &faction) {
                Ok(id) => CommandOutcome::PlayerAdded(id),
                Err(err) => CommandOutcome::Rejected(err),
            },
            Command::RemovePlayer { player } => Done(self.remove_player(player)),
            Command::RenamePlayer { player, name } => Done(self.rename_player(player, &name)),
            Command::ChangeFaction { player, faction } => {
                Done(self.change_faction(player, &faction))
            }
            Command::SetSpeaker { player } => Done(self.set_speaker(player)),
            Command::SetPhase { phase } => {
                self.set_game_phase(phase);
                Done(true)
            }

            Command::AssignCard { player, initiative } => {
                Done(self.assign_card(player, initiative))
            }
            Command::UnassignCard { initiative } => {
                // Releasing a card nobody holds is a no-op, not a failure.
                let known = self.state().card(initiative).is_some();
                self.unassign_card(initiative);
                Done(known)
            }
            Command::ToggleActivation { initiative } => Done(self.toggle_activation(initiative)),
            Command::DeactivateCard { initiative } => Done(self.deactivate_card(initiative)),
            Command::ResetActivations => {
                self.reset_all_activations();
                Done(true)
            }

            Command::AdvanceTurn => Done(self.advance_turn()),
            Command::MarkPassed { player } => Done(self.mark_passed(player)),
            Command::Unpass { player } => Done(self.unpass(player)),
            Command::ResetAllPasses => {
                self.reset_all_passes();
                Done(true)
            }
            Command::ResetTurnCount => {
                self.reset_turn_count();
                Done(true)
            }
            Command::StartNewRound => {
                self.start_new_round();
                Done(true)
            }
            Command::StartTimer => Done(self.start_timer_at(now)),
            Command::PauseTimer => Done(self.pause_timer_at(now)),
            Command::ResetTimer => {
                self.reset_timer();
                Done(true)
            }

            Command::OpenAgenda { name } => {
                CommandOutcome::AgendaOpened(self.open_agenda_at(&name, now))
            }
            Command::RecordVote {
                player,
                vote_count,
                voted_for,
            } => Done(self.record_vote(player, vote_count, &voted_for)),
            Command::SetOutcome { outcome } => Done(self.set_agenda_outcome(&outcome)),
            Command::CompleteAgenda => Done(self.complete_agenda()),
            Command::CancelAgenda => Done(self.cancel_current_agenda()),
            Command::DeleteAgenda { agenda } => Done(self.delete_agenda(agenda)),
            Command::ClearAgendaHistory => {
                self.clear_agenda_history();
                Done(true)
            }

            Command::IncrementVp { player, amount } => {
                Done(self.increment_vp_at(player, amount, now))
            }
            Command::DecrementVp { player, amount } => {
                Done(self.decrement_vp_at(player, amount, now))
            }
            Command::SetVp { player, points } => Done(self.set_vp_at(player, points, now)),
            Command::ResetAllVps => {
                self.reset_all_vps_at(now);
                Done(true)
            }
            Command::ClearVpHistory => {
                self.clear_vp_history();
                Done(true)
            }

            Command::ResetGame => {
                self.reset_game();
                Done(true)
            }
        }
    }
}
