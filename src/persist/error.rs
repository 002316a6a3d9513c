use thiserror::Error;

/// Failure to save or load tracker state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed binary document: {0}")]
    Binary(#[from] bincode::Error),

    #[error("unsupported document version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}
