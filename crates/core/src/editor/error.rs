//! Occurrence editor error types.

use chrono::NaiveDate;
use pennywise_shared::types::{EntryId, ExclusionId};
use pennywise_shared::{AppError, YearMonth};
use thiserror::Error;

use crate::entry::{EntryError, EntryKind};
use crate::store::StoreError;

/// Errors raised by the occurrence editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// "This month" operations need a recurring entry.
    #[error("Entry {0} is not recurring")]
    NotRecurring(EntryId),

    /// The month lies outside the entry's recurrence window.
    #[error("Entry {entry_id} does not recur in {month}")]
    OutsideRecurrence {
        /// Entry.
        entry_id: EntryId,
        /// Requested month.
        month: YearMonth,
    },

    /// The replacement date must fall inside the forked month.
    #[error("Date {date} is outside {month}")]
    DateOutsideMonth {
        /// Requested date.
        date: NaiveDate,
        /// Forked month.
        month: YearMonth,
    },

    /// The entry exists but is of the other kind.
    #[error("Entry {entry_id} is not of kind {expected}")]
    KindMismatch {
        /// Entry.
        entry_id: EntryId,
        /// Kind the caller asked for.
        expected: EntryKind,
    },

    /// The requested values break an entry rule.
    #[error(transparent)]
    Invalid(#[from] EntryError),

    /// A store call failed before anything was written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The replacement could not be written; the exclusion was rolled back.
    #[error("Replacement for {entry_id} in {month} failed: {source}")]
    ReplacementFailed {
        /// Forked entry.
        entry_id: EntryId,
        /// Forked month.
        month: YearMonth,
        /// Underlying store error.
        source: StoreError,
    },

    /// The exclusion is committed but the replacement is not.
    ///
    /// The occurrence is hidden for the month. Re-issuing the same edit
    /// completes it without duplicating the exclusion.
    #[error(
        "Exclusion {exclusion_id} committed for {entry_id} in {month} but replacement failed: {source}"
    )]
    PartialFailure {
        /// The committed exclusion.
        exclusion_id: ExclusionId,
        /// Forked entry.
        entry_id: EntryId,
        /// Forked month.
        month: YearMonth,
        /// Underlying store error.
        source: StoreError,
    },
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::NotRecurring(_)
            | EditorError::OutsideRecurrence { .. }
            | EditorError::DateOutsideMonth { .. }
            | EditorError::KindMismatch { .. } => Self::Validation(err.to_string()),
            EditorError::Invalid(inner) => inner.into(),
            EditorError::Store(inner) => inner.into(),
            EditorError::ReplacementFailed { .. } => Self::Storage(err.to_string()),
            EditorError::PartialFailure { .. } => Self::PartialFailure(err.to_string()),
        }
    }
}
