//! Store error types.

use pennywise_shared::AppError;
use thiserror::Error;

/// Errors reported by entry and exclusion stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record does not exist (or is not visible to the caller).
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Record type.
        entity: &'static str,
        /// Requested id.
        id: String,
    },

    /// The write conflicts with the current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store could not be reached or timed out.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The stored document cannot be interpreted.
    #[error("Corrupt store: {0}")]
    Corrupt(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Shorthand for a missing entry.
    #[must_use]
    pub fn entry_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "Entry",
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing exclusion.
    #[must_use]
    pub fn exclusion_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "Exclusion",
            id: id.to_string(),
        }
    }

    /// Returns true for `NotFound`.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Conflict(msg) => Self::Conflict(msg),
            StoreError::Unavailable(_)
            | StoreError::Corrupt(_)
            | StoreError::Io(_)
            | StoreError::Serialization(_) => Self::Storage(err.to_string()),
        }
    }
}
