//! Error types for the adventure engine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for adventure operations.
pub type AdventureResult<T> = Result<T, AdventureError>;

/// Errors raised while loading or validating a world.
///
/// Gameplay outcomes (locked doors, wrong accusations) are not errors; they
/// are reported through [`crate::MoveOutcome`] and [`crate::Verdict`].
#[derive(Debug, Error)]
pub enum AdventureError {
    /// Two definitions of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// Definition kind (location, item, suspect).
        kind: &'static str,
        /// The repeated id.
        id: String,
    },

    /// A definition refers to an id that is not defined.
    #[error("{context} refers to unknown {kind} `{id}`")]
    UnknownReference {
        /// Kind of the missing definition.
        kind: &'static str,
        /// The dangling id.
        id: String,
        /// Where the reference was found.
        context: String,
    },

    /// World file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// World or save data is not valid JSON for the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from a [`crate::SaveStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key contains characters the backend cannot map to a slot.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying I/O failure.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
