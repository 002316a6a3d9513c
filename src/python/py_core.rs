//! Core type bindings for Python.

use pyo3::prelude::*;

use crate::core::{GamePhase, PlayerId};

/// Python wrapper for PlayerId.
#[pyclass(name = "PlayerId")]
#[derive(Clone, Debug)]
pub struct PyPlayerId(pub PlayerId);

#[pymethods]
impl PyPlayerId {
    #[new]
    fn new(id: u64) -> Self {
        Self(PlayerId::new(id))
    }

    /// Get the raw ID value.
    #[getter]
    fn id(&self) -> u64 {
        self.0.raw()
    }

    fn __repr__(&self) -> String {
        format!("PlayerId({})", self.0)
    }

    fn __str__(&self) -> String {
        self.0.to_string()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.0.raw()
    }
}

/// Parse a phase name (`setup`, `status`, `action`, `agenda`).
pub(crate) fn parse_phase(name: &str) -> PyResult<GamePhase> {
    name.parse::<GamePhase>()
        .map_err(pyo3::exceptions::PyValueError::new_err)
}
