//! Error taxonomy
//!
//! None of these are fatal. Each has a documented recovery point where it is
//! logged and swallowed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeesawError {
    /// A persisted blob exists but does not decode into a well-formed state
    #[error("failed to restore simulation state: {0}")]
    Deserialization(String),

    /// The store could not durably write or remove a key
    #[error("failed to persist '{key}': {reason}")]
    PersistenceWrite { key: String, reason: String },

    /// No store could be opened at all
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Audio feedback could not be realised (e.g. blocked until user gesture)
    #[error("audio feedback unavailable: {0}")]
    FeedbackUnavailable(String),
}

impl From<serde_json::Error> for SeesawError {
    fn from(err: serde_json::Error) -> Self {
        SeesawError::Deserialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SeesawError>;
