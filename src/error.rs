/// Error types for the notebook, the AI capabilities and the dispatcher

use crate::note::NoteKind;
use thiserror::Error;

/// Failures talking to the persisted key-value store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Failed to read storage: {0}")]
    Read(String),

    #[error("Failed to write storage: {0}")]
    Write(String),

    #[error("Failed to parse storage: {0}")]
    Decode(String),

    #[error("Failed to serialize storage: {0}")]
    Encode(String),
}

/// Failures of a host-provided AI capability
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiError {
    #[error("{0} capability is not available in this browser")]
    Unavailable(NoteKind),

    #[error("{kind} capability failed: {message}")]
    Failed { kind: NoteKind, message: String },

    #[error("{0} capability returned no text")]
    Empty(NoteKind),
}

/// Everything that can stop a menu click from producing a note
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("No text selected")]
    NoSelection,

    #[error("Unknown menu action: {0}")]
    UnknownAction(String),

    #[error(transparent)]
    AiCapabilityUnavailable(AiError),

    #[error("{} produced an empty result", .0.display_name())]
    EmptyResult(NoteKind),

    #[error(transparent)]
    StorageFailure(#[from] StoreError),
}

impl From<AiError> for DispatchError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Empty(kind) => DispatchError::EmptyResult(kind),
            other => DispatchError::AiCapabilityUnavailable(other),
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
