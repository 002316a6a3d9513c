//! Game phase and per-phase bookkeeping.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::agenda::Agenda;

/// Phase of the game round.
///
/// Any phase may follow any other; sequencing policy lives outside the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Setup,
    Status,
    Action,
    Agenda,
}

impl GamePhase {
    /// All phases in table order.
    pub const ALL: [GamePhase; 4] = [
        GamePhase::Setup,
        GamePhase::Status,
        GamePhase::Action,
        GamePhase::Agenda,
    ];

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GamePhase::Setup => "setup",
            GamePhase::Status => "status",
            GamePhase::Action => "action",
            GamePhase::Agenda => "agenda",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GamePhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GamePhase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| format!("unknown game phase: {s}"))
    }
}

/// Action phase bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPhaseState {
    /// Derived: roster non-empty and every player has passed.
    pub all_passed: bool,

    /// Number of turn cycles started. Only ever incremented, except by an
    /// explicit turn-count reset.
    pub turn_count: u32,
}

/// Agenda phase bookkeeping: the archive of completed agendas.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaPhaseState {
    /// Completed agendas, oldest first.
    pub agendas: Vector<Agenda>,

    /// Position of the most recently archived agenda.
    pub current_agenda_index: usize,
}

/// Turn timer bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub running: bool,

    /// When the running interval started.
    pub started_at: Option<DateTime<Utc>>,
}
