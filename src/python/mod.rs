//! Python bindings for the round tracker.
//!
//! # Quick Start
//!
//! ```python
//! import round_tracker as rt
//!
//! session = rt.Session(seed=42)
//! ada = session.add_player("Ada", "winnu")
//! bo = session.add_player("Bo", "nomad")
//!
//! session.assign_card(ada, 3)
//! session.assign_card(bo, 1)
//! session.turn_order()  # [bo, ada]
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_session;

pub use py_core::*;
pub use py_session::*;

/// round_tracker: rules and state engine for a strategy game session.
#[pymodule]
fn round_tracker(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlayerId>()?;
    m.add_class::<PySession>()?;
    Ok(())
}
