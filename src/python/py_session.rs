//! Session bindings for Python.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::core::{Initiative, TrackerConfig};
use crate::persist::PersistenceError;
use crate::session::{Command, CommandOutcome, Session};

use super::py_core::{parse_phase, PyPlayerId};

fn persistence_err(err: PersistenceError) -> PyErr {
    match err {
        PersistenceError::Io(err) => PyIOError::new_err(err.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Python wrapper for Session.
///
/// Observers hold non-`Send` callbacks, so the session stays on the thread
/// that created it.
#[pyclass(name = "Session", unsendable)]
pub struct PySession {
    inner: Session,
}

#[pymethods]
impl PySession {
    /// Create a session.
    ///
    /// # Arguments
    /// - win_vp: Points needed to win
    /// - seed: Identifier seed; random when omitted
    #[new]
    #[pyo3(signature = (win_vp = 10, seed = None))]
    fn new(win_vp: u32, seed: Option<u64>) -> Self {
        let mut config = TrackerConfig::default().with_win_vp(win_vp);
        if let Some(seed) = seed {
            config = config.with_id_seed(seed);
        }
        Self {
            inner: Session::new(config),
        }
    }

    /// Register a player. Raises ValueError listing every problem.
    fn add_player(&mut self, name: &str, faction: &str) -> PyResult<PyPlayerId> {
        self.inner
            .add_player(name, faction)
            .map(PyPlayerId)
            .map_err(|err| PyValueError::new_err(err.to_string()))
    }

    fn remove_player(&mut self, player: &PyPlayerId) -> bool {
        self.inner.remove_player(player.0)
    }

    fn set_speaker(&mut self, player: &PyPlayerId) -> bool {
        self.inner.set_speaker(player.0)
    }

    fn set_phase(&mut self, phase: &str) -> PyResult<bool> {
        Ok(self.inner.set_game_phase(parse_phase(phase)?))
    }

    #[getter]
    fn phase(&self) -> String {
        self.inner.state().phase.to_string()
    }

    fn assign_card(&mut self, player: &PyPlayerId, initiative: u8) -> bool {
        self.inner.assign_card(player.0, Initiative::new(initiative))
    }

    fn unassign_card(&mut self, initiative: u8) -> bool {
        self.inner.unassign_card(Initiative::new(initiative))
    }

    /// True when every player holds exactly their quota.
    fn all_assigned(&self) -> bool {
        self.inner.validate_all_assigned().valid
    }

    /// Player whose turn it is.
    fn current_player(&self) -> Option<PyPlayerId> {
        self.inner.current_player().map(|p| PyPlayerId(p.id))
    }

    /// Active players in initiative order.
    fn turn_order(&self) -> Vec<PyPlayerId> {
        self.inner
            .active_players()
            .into_iter()
            .map(|p| PyPlayerId(p.id))
            .collect()
    }

    fn advance_turn(&mut self) -> bool {
        self.inner.advance_turn()
    }

    fn mark_passed(&mut self, player: &PyPlayerId) -> bool {
        self.inner.mark_passed(player.0)
    }

    fn start_new_round(&mut self) {
        self.inner.start_new_round();
    }

    fn increment_vp(&mut self, player: &PyPlayerId, amount: u32) -> bool {
        self.inner.increment_vp(player.0, amount)
    }

    fn vp(&self, player: &PyPlayerId) -> u32 {
        self.inner.vp(player.0)
    }

    /// Players at or above the winning total.
    fn winners(&self) -> Vec<PyPlayerId> {
        self.inner
            .check_win_condition()
            .winners
            .into_iter()
            .map(|p| PyPlayerId(p.id))
            .collect()
    }

    /// Run a JSON-encoded command. Returns whether it succeeded.
    fn execute(&mut self, command_json: &str) -> PyResult<bool> {
        let command: Command =
            serde_json::from_str(command_json)
                .map_err(|err| PyValueError::new_err(err.to_string()))?;
        Ok(match self.inner.execute(command) {
            CommandOutcome::Rejected(err) => return Err(PyValueError::new_err(err.to_string())),
            outcome => outcome.is_success(),
        })
    }

    /// Export the state as a JSON document.
    fn export_json(&self) -> PyResult<String> {
        self.inner.export_json().map_err(persistence_err)
    }

    /// Replace the state with a JSON document.
    fn import_json(&mut self, text: &str) -> PyResult<()> {
        self.inner.import_json(text).map_err(persistence_err)
    }

    fn __repr__(&self) -> String {
        let state = self.inner.state();
        format!(
            "Session(players={}, phase={})",
            state.player_count(),
            state.phase
        )
    }
}
