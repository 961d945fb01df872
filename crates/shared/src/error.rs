//! Application-wide error types.
//!
//! Module errors (`EntryError`, `EditorError`, `StoreError`) are converted into
//! [`AppError`] at the presentation boundary. The presentation layer shows
//! only [`AppError::user_message`]; the detailed `Display` output is for logs.

use thiserror::Error;

use crate::types::MonthKeyError;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Generic notice shown to users for any engine failure.
pub const GENERIC_FAILURE_NOTICE: &str = "Something went wrong. Please try again.";

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict with the current state of the store.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The external store failed or could not be reached.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A multi-step operation committed its first step only.
    #[error("Partial failure: {0}")]
    PartialFailure(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::PartialFailure(_) => "PARTIAL_FAILURE",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The only text the UI layer displays; failures are not classified for users.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_NOTICE
    }

    /// Returns true if re-issuing the whole operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::PartialFailure(_))
    }
}

impl From<MonthKeyError> for AppError {
    fn from(err: MonthKeyError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
