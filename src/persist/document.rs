//! Versioned save document.
//!
//! The document wraps the full state with a format version and a save
//! timestamp. Two encodings are supported: pretty JSON for storage and
//! export, and compact bincode for snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::TrackerState;

use super::error::PersistenceError;

/// Current document format.
pub const FORMAT_VERSION: u32 = 1;

/// A saved tracker state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDocument {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub state: TrackerState,
}

impl StateDocument {
    /// Wrap a state in a current-format document.
    #[must_use]
    pub fn new(state: TrackerState, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: FORMAT_VERSION,
            saved_at,
            state,
        }
    }

    /// Unwrap the state, refusing documents written by another format.
    pub fn into_state(self) -> Result<TrackerState, PersistenceError> {
        if self.version != FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(self.state)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
