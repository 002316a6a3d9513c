//! Saving and loading sessions.
//!
//! ## Key Types
//!
//! - `StateDocument`: versioned envelope around a `TrackerState`
//! - `Storage`: string key-value backend (`MemoryStorage`, `FileStorage`)
//! - `PersistenceError`: everything that can go wrong on the way
//!
//! Loading replaces the whole state in one commit. Documents from another
//! format version are refused rather than migrated.

mod document;
mod error;
mod storage;

pub use document::{StateDocument, FORMAT_VERSION};
pub use error::PersistenceError;
pub use storage::{FileStorage, MemoryStorage, Storage, STORAGE_KEY};

use chrono::Utc;
use log::debug;

use crate::session::Session;

impl Session {
    /// Current state as a saveable document.
    #[must_use]
    pub fn document(&self) -> StateDocument {
        StateDocument::new(self.snapshot(), Utc::now())
    }

    /// Save under [`STORAGE_KEY`].
    pub fn save(&self, storage: &mut impl Storage) -> Result<(), PersistenceError> {
        let text = self.document().to_json()?;
        storage.write(STORAGE_KEY, &text)?;
        debug!("saved session ({} bytes)", text.len());
        Ok(())
    }

    /// Load from [`STORAGE_KEY`]. `Ok(false)` when nothing is saved; the
    /// current state is left alone in that case and on any error.
    pub fn load(&mut self, storage: &impl Storage) -> Result<bool, PersistenceError> {
        let Some(text) = storage.read(STORAGE_KEY)? else {
            return Ok(false);
        };
        self.import_json(&text)?;
        Ok(true)
    }

    /// Is there anything saved under [`STORAGE_KEY`]?
    pub fn has_saved(storage: &impl Storage) -> Result<bool, PersistenceError> {
        Ok(storage.read(STORAGE_KEY)?.is_some())
    }

    /// Forget the saved state.
    pub fn clear_saved(storage: &mut impl Storage) -> Result<bool, PersistenceError> {
        storage.remove(STORAGE_KEY)
    }

    /// Pretty JSON export of the current state.
    pub fn export_json(&self) -> Result<String, PersistenceError> {
        self.document().to_json()
    }

    /// Replace the current state with a JSON export.
    pub fn import_json(&mut self, text: &str) -> Result<(), PersistenceError> {
        let state = StateDocument::from_json(text)?.into_state()?;
        self.replace_state(state);
        Ok(())
    }

    /// Compact binary export of the current state.
    pub fn export_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        self.document().to_bytes()
    }

    /// Replace the current state with a binary export.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<(), PersistenceError> {
        let state = StateDocument::from_bytes(bytes)?.into_state()?;
        self.replace_state(state);
        Ok(())
    }
}
